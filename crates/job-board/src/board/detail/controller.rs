use std::sync::Arc;

use tracing::{debug, info};

use super::view::{JobDetailView, JobPage};
use crate::board::applicants::{ApplicantViewModel, SortOrder, StatusFilter};
use crate::board::domain::{Application, ApplicationSubmission, Job, JobId};
use crate::board::identity::{IdentityProvider, IdentitySession};
use crate::board::repository::{JobRepository, RepositoryError};

/// Drives the single-job page: one fetch per job id once identity is ready, the
/// hiring-status toggle, and the apply action. Mutations are always followed by a
/// refetch; nothing is patched locally.
pub struct JobDetailController<R, I> {
    repository: Arc<R>,
    identity: Arc<I>,
    job_id: JobId,
    loaded_for: Option<JobId>,
    job: Option<Job>,
    applicants: ApplicantViewModel,
}

impl<R, I> JobDetailController<R, I>
where
    R: JobRepository,
    I: IdentityProvider,
{
    pub fn new(repository: Arc<R>, identity: Arc<I>, job_id: JobId) -> Self {
        Self {
            repository,
            identity,
            job_id,
            loaded_for: None,
            job: None,
            applicants: ApplicantViewModel::default(),
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    pub fn applicants(&self) -> &[Application] {
        self.applicants.applications()
    }

    /// Points the page at another job. The next [`load`](Self::load) fetches it and
    /// the sort/filter selection starts over.
    pub fn set_job_id(&mut self, job_id: JobId) {
        if job_id == self.job_id {
            return;
        }
        self.job_id = job_id;
        self.loaded_for = None;
        self.job = None;
        self.applicants = ApplicantViewModel::default();
    }

    pub fn set_sort_by(&mut self, sort_by: SortOrder) {
        self.applicants.set_sort_by(sort_by);
    }

    pub fn set_status_filter(&mut self, status_filter: StatusFilter) {
        self.applicants.set_status_filter(status_filter);
    }

    /// Fetches the job unless identity is still pending or this id was already
    /// fetched. Returns whether a fetch ran.
    pub async fn load(&mut self) -> Result<bool, DetailError> {
        if !self.identity.session().ready {
            debug!(job_id = %self.job_id.0, "identity pending, deferring job fetch");
            return Ok(false);
        }
        if self.loaded_for.as_ref() == Some(&self.job_id) {
            return Ok(false);
        }
        self.fetch().await?;
        Ok(true)
    }

    /// Sends the negation of the current `is_open` flag, then refetches.
    pub async fn toggle_hiring_status(&mut self) -> Result<(), DetailError> {
        let job = self.job.as_ref().ok_or(DetailError::NotLoaded)?;
        let is_open = !job.is_open;

        self.repository
            .update_hiring_status(&self.job_id, is_open)
            .await?;
        info!(job_id = %self.job_id.0, is_open, "hiring status updated");

        if self.identity.session().ready {
            self.fetch().await?;
        }
        Ok(())
    }

    /// Submits an application for the signed-in viewer, then refetches.
    pub async fn apply(&mut self, candidate_name: String) -> Result<Application, DetailError> {
        let viewer = self
            .identity
            .session()
            .viewer
            .ok_or(DetailError::SignedOut)?;

        let submission = ApplicationSubmission {
            candidate_id: viewer.id,
            candidate_name,
        };
        let application = self
            .repository
            .create_application(&self.job_id, submission)
            .await?;
        info!(
            job_id = %self.job_id.0,
            application_id = %application.id.0,
            "application submitted"
        );

        self.fetch().await?;
        Ok(application)
    }

    pub fn render(&self) -> JobPage {
        let IdentitySession { ready, viewer } = self.identity.session();
        if !ready || self.loaded_for.as_ref() != Some(&self.job_id) {
            return JobPage::Loading;
        }

        match &self.job {
            Some(job) => JobPage::Ready(Box::new(JobDetailView::build(
                job,
                viewer.as_ref(),
                &self.applicants,
            ))),
            None => JobPage::not_found(),
        }
    }

    async fn fetch(&mut self) -> Result<(), DetailError> {
        let job_id = self.job_id.clone();
        let job = self.repository.fetch_job(&job_id).await?;

        debug!(job_id = %job_id.0, found = job.is_some(), "job fetched");
        let applications = job
            .as_ref()
            .map(|job| job.applications.clone())
            .unwrap_or_default();
        self.applicants.set_applications(applications);
        self.job = job;
        self.loaded_for = Some(job_id);
        Ok(())
    }
}

/// Error raised by detail page actions.
#[derive(Debug, thiserror::Error)]
pub enum DetailError {
    #[error("job has not been loaded")]
    NotLoaded,
    #[error("no signed-in viewer")]
    SignedOut,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
