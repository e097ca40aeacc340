use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{Application, ApplicationStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub const fn value(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }
}

/// Status filter for the applicant list; `All` keeps every application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ApplicationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }

    pub const fn value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection '{0}'")]
pub struct UnknownSelection(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSelection;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            other => Err(UnknownSelection(other.to_string())),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownSelection;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized == "all" {
            return Ok(Self::All);
        }
        ApplicationStatus::ordered()
            .into_iter()
            .find(|status| status.value() == normalized)
            .map(Self::Only)
            .ok_or(UnknownSelection(normalized))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl Serialize for StatusFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.value())
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Label/value pair backing a select control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
}

pub const SORT_OPTIONS: [SelectOption; 2] = [
    SelectOption {
        label: "Newest",
        value: "newest",
    },
    SelectOption {
        label: "Oldest",
        value: "oldest",
    },
];

pub const STATUS_OPTIONS: [SelectOption; 5] = [
    SelectOption {
        label: "All",
        value: "all",
    },
    SelectOption {
        label: "Applied",
        value: "applied",
    },
    SelectOption {
        label: "Interviewing",
        value: "interviewing",
    },
    SelectOption {
        label: "Hired",
        value: "hired",
    },
    SelectOption {
        label: "Rejected",
        value: "rejected",
    },
];

/// Filters by status, then orders by creation time. The sort is stable, so
/// applications created at the same instant keep their original order.
pub fn derive(
    applications: &[Application],
    sort_by: SortOrder,
    status_filter: StatusFilter,
) -> Vec<Application> {
    let mut selected: Vec<Application> = applications
        .iter()
        .filter(|application| status_filter.matches(application.status))
        .cloned()
        .collect();

    match sort_by {
        SortOrder::Newest => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => selected.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }

    selected
}

/// Memoised applicant list; recomputed whenever any input changes.
#[derive(Debug, Clone, Default)]
pub struct ApplicantViewModel {
    applications: Vec<Application>,
    sort_by: SortOrder,
    status_filter: StatusFilter,
    derived: Vec<Application>,
}

impl ApplicantViewModel {
    pub fn new(applications: Vec<Application>) -> Self {
        let mut model = Self {
            applications,
            ..Self::default()
        };
        model.recompute();
        model
    }

    pub fn sort_by(&self) -> SortOrder {
        self.sort_by
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn applications(&self) -> &[Application] {
        &self.derived
    }

    pub fn set_applications(&mut self, applications: Vec<Application>) {
        if applications != self.applications {
            self.applications = applications;
            self.recompute();
        }
    }

    pub fn set_sort_by(&mut self, sort_by: SortOrder) {
        if sort_by != self.sort_by {
            self.sort_by = sort_by;
            self.recompute();
        }
    }

    pub fn set_status_filter(&mut self, status_filter: StatusFilter) {
        if status_filter != self.status_filter {
            self.status_filter = status_filter;
            self.recompute();
        }
    }

    /// Back to newest-first with no filter, keeping the applications.
    pub fn reset_selection(&mut self) {
        self.sort_by = SortOrder::default();
        self.status_filter = StatusFilter::default();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.derived = derive(&self.applications, self.sort_by, self.status_filter);
    }
}
