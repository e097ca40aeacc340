use serde::Serialize;

use crate::board::applicants::{
    ApplicantViewModel, SelectOption, SortOrder, StatusFilter, SORT_OPTIONS, STATUS_OPTIONS,
};
use crate::board::domain::{Application, Job, JobId};
use crate::board::identity::Viewer;

pub const NOT_FOUND_MESSAGE: &str = "Job not found";

/// What the detail page shows for one viewer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobPage {
    Loading,
    // TODO: wait before declaring a job missing; a slow fetch and an absent job render
    // the same way today.
    NotFound { message: &'static str },
    Ready(Box<JobDetailView>),
}

impl JobPage {
    pub fn not_found() -> Self {
        Self::NotFound {
            message: NOT_FOUND_MESSAGE,
        }
    }

    pub fn detail(&self) -> Option<&JobDetailView> {
        match self {
            Self::Ready(view) => Some(view),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobDetailView {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub logo_url: String,
    pub location: String,
    pub description: String,
    pub requirements: String,
    pub applicant_count: usize,
    pub is_open: bool,
    pub hiring_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hiring_status_control: Option<HiringStatusControl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply: Option<ApplyAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicants: Option<ApplicantPanel>,
}

/// Open/close select shown to the posting's recruiter.
#[derive(Debug, Clone, Serialize)]
pub struct HiringStatusControl {
    pub placeholder: String,
    pub options: [SelectOption; 2],
}

const HIRING_OPTIONS: [SelectOption; 2] = [
    SelectOption {
        label: "Open",
        value: "open",
    },
    SelectOption {
        label: "Close",
        value: "close",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct ApplyAction {
    pub label: &'static str,
    pub has_applied: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicantPanel {
    pub sort_by: SortOrder,
    pub status_filter: StatusFilter,
    pub sort_options: [SelectOption; 2],
    pub status_options: [SelectOption; 5],
    pub applications: Vec<Application>,
}

impl JobDetailView {
    /// Applies the visibility rules for `viewer`. These only decide what is
    /// rendered; they are not an authorization check.
    pub(crate) fn build(job: &Job, viewer: Option<&Viewer>, applicants: &ApplicantViewModel) -> Self {
        let is_owner = viewer.is_some_and(|viewer| job.is_recruiter(&viewer.id));
        let is_recruiter = viewer.is_some_and(Viewer::is_recruiter);
        let has_applied = viewer.is_some_and(|viewer| job.has_applied(&viewer.id));

        let hiring_status_control = is_owner.then(|| HiringStatusControl {
            placeholder: format!("Hiring Status ( {} )", job.status_label()),
            options: HIRING_OPTIONS,
        });

        let apply = (!is_recruiter).then(|| ApplyAction {
            label: if !job.is_open {
                "Hiring Closed"
            } else if has_applied {
                "Applied"
            } else {
                "Apply"
            },
            has_applied,
            disabled: has_applied || !job.is_open,
        });

        let applicants = (is_owner && !job.applications.is_empty()).then(|| ApplicantPanel {
            sort_by: applicants.sort_by(),
            status_filter: applicants.status_filter(),
            sort_options: SORT_OPTIONS,
            status_options: STATUS_OPTIONS,
            applications: applicants.applications().to_vec(),
        });

        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.name.clone(),
            logo_url: job.company.logo_url.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            applicant_count: job.applications.len(),
            is_open: job.is_open,
            hiring_status: job.status_label(),
            hiring_status_control,
            apply,
            applicants,
        }
    }
}
