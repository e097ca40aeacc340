pub mod applicants;
pub mod debounce;
pub mod detail;
pub mod domain;
pub mod identity;
pub mod listing;
pub mod pagination;
pub mod repository;
pub mod router;

#[cfg(test)]
mod tests;

pub use applicants::{derive, ApplicantViewModel, SortOrder, StatusFilter};
pub use debounce::Debounced;
pub use detail::{DetailError, JobDetailController, JobPage};
pub use domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationSubmission, Company, Job, JobId,
    UserId,
};
pub use identity::{HeaderIdentity, IdentityProvider, IdentitySession, Viewer, ViewerRole};
pub use listing::{JobListing, JobSummary};
pub use pagination::{PageItem, PageWindow, Pager};
pub use repository::{JobRepository, RepositoryError};
pub use router::{job_router, BoardSettings};
