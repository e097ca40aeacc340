use std::future::Future;

use super::domain::{Application, ApplicationSubmission, Job, JobId};

/// Data layer behind the job pages. Implementations own persistence and are the
/// place where ownership of a posting is enforced.
pub trait JobRepository: Send + Sync {
    fn fetch_job(
        &self,
        job_id: &JobId,
    ) -> impl Future<Output = Result<Option<Job>, RepositoryError>> + Send;

    fn update_hiring_status(
        &self,
        job_id: &JobId,
        is_open: bool,
    ) -> impl Future<Output = Result<Job, RepositoryError>> + Send;

    fn list_jobs(&self) -> impl Future<Output = Result<Vec<Job>, RepositoryError>> + Send;

    fn create_application(
        &self,
        job_id: &JobId,
        submission: ApplicationSubmission,
    ) -> impl Future<Output = Result<Application, RepositoryError>> + Send;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("job is no longer accepting applications")]
    Closed,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
