use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

/// Identity-provider subject, shared by recruiters and candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub logo_url: String,
}

/// Snapshot of a posting as returned by one fetch. Only the hiring-status update
/// changes it upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub location: String,
    pub description: String,
    /// Markdown source; rendering happens in the client.
    pub requirements: String,
    pub is_open: bool,
    pub recruiter_id: UserId,
    pub company: Company,
    #[serde(default)]
    pub applications: Vec<Application>,
}

impl Job {
    pub fn status_label(&self) -> &'static str {
        if self.is_open {
            "Open"
        } else {
            "Closed"
        }
    }

    pub fn is_recruiter(&self, user: &UserId) -> bool {
        &self.recruiter_id == user
    }

    pub fn has_applied(&self, candidate: &UserId) -> bool {
        self.applications
            .iter()
            .any(|application| &application.candidate_id == candidate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Interviewing,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Applied, Self::Interviewing, Self::Hired, Self::Rejected]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Interviewing => "Interviewing",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }

    pub const fn value(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Interviewing => "interviewing",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }
}

/// A candidate's submission against a job. Owned by the parent [`Job`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: UserId,
    pub candidate_name: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload collected by the apply drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub candidate_id: UserId,
    pub candidate_name: String,
}
