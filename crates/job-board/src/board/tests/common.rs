use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::board::domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationSubmission, Company, Job, JobId,
    UserId,
};
use crate::board::identity::{IdentitySession, Viewer};
use crate::board::repository::{JobRepository, RepositoryError};
use crate::board::router::{job_router, BoardSettings};

pub(super) const RECRUITER: &str = "rec_owner";
pub(super) const OTHER_RECRUITER: &str = "rec_other";
pub(super) const CANDIDATE: &str = "cand_alice";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Call {
    Fetch(JobId),
    UpdateHiringStatus(JobId, bool),
    List,
    CreateApplication(JobId, UserId),
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    jobs: Mutex<BTreeMap<JobId, Job>>,
    calls: Mutex<Vec<Call>>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

impl MemoryRepository {
    pub(super) fn with_jobs(jobs: Vec<Job>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.jobs.lock().expect("jobs mutex poisoned");
            for job in jobs {
                guard.insert(job.id.clone(), job);
            }
        }
        repository
    }

    pub(super) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }
}

impl JobRepository for MemoryRepository {
    async fn fetch_job(&self, job_id: &JobId) -> Result<Option<Job>, RepositoryError> {
        self.record(Call::Fetch(job_id.clone()));
        let guard = self.jobs.lock().expect("jobs mutex poisoned");
        Ok(guard.get(job_id).cloned())
    }

    async fn update_hiring_status(
        &self,
        job_id: &JobId,
        is_open: bool,
    ) -> Result<Job, RepositoryError> {
        self.record(Call::UpdateHiringStatus(job_id.clone(), is_open));
        let mut guard = self.jobs.lock().expect("jobs mutex poisoned");
        let job = guard.get_mut(job_id).ok_or(RepositoryError::NotFound)?;
        job.is_open = is_open;
        Ok(job.clone())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        self.record(Call::List);
        let guard = self.jobs.lock().expect("jobs mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    async fn create_application(
        &self,
        job_id: &JobId,
        submission: ApplicationSubmission,
    ) -> Result<Application, RepositoryError> {
        self.record(Call::CreateApplication(
            job_id.clone(),
            submission.candidate_id.clone(),
        ));
        let mut guard = self.jobs.lock().expect("jobs mutex poisoned");
        let job = guard.get_mut(job_id).ok_or(RepositoryError::NotFound)?;
        if !job.is_open {
            return Err(RepositoryError::Closed);
        }
        if job.has_applied(&submission.candidate_id) {
            return Err(RepositoryError::Conflict);
        }
        let sequence = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let application = Application {
            id: ApplicationId(format!("app-{sequence:04}")),
            job_id: job_id.clone(),
            candidate_id: submission.candidate_id,
            candidate_name: submission.candidate_name,
            status: ApplicationStatus::Applied,
            created_at: Utc::now(),
        };
        job.applications.push(application.clone());
        Ok(application)
    }
}

pub(super) struct OfflineRepository;

impl JobRepository for OfflineRepository {
    async fn fetch_job(&self, _job_id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn update_hiring_status(
        &self,
        _job_id: &JobId,
        _is_open: bool,
    ) -> Result<Job, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn create_application(
        &self,
        _job_id: &JobId,
        _submission: ApplicationSubmission,
    ) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn application(
    id: &str,
    candidate: &str,
    status: ApplicationStatus,
    day: u32,
) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        job_id: JobId::from("job-rust"),
        candidate_id: UserId::from(candidate),
        candidate_name: format!("Candidate {candidate}"),
        status,
        created_at: Utc
            .with_ymd_and_hms(2025, 6, day, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn job(applications: Vec<Application>) -> Job {
    Job {
        id: JobId::from("job-rust"),
        title: "Rust Platform Engineer".to_string(),
        location: "Remote".to_string(),
        description: "Own the scheduling core.".to_string(),
        requirements: "- 3+ years of Rust\n- async experience".to_string(),
        is_open: true,
        recruiter_id: UserId::from(RECRUITER),
        company: Company {
            name: "Ferrous Systems".to_string(),
            logo_url: "/logos/ferrous.svg".to_string(),
        },
        applications,
    }
}

pub(super) fn staffed_job() -> Job {
    job(vec![
        application("app-1", "cand_bob", ApplicationStatus::Applied, 2),
        application("app-2", "cand_carol", ApplicationStatus::Hired, 9),
        application("app-3", CANDIDATE, ApplicationStatus::Interviewing, 5),
    ])
}

pub(super) fn repository_with(job: Job) -> Arc<MemoryRepository> {
    Arc::new(MemoryRepository::with_jobs(vec![job]))
}

pub(super) fn session(viewer: Viewer) -> Arc<IdentitySession> {
    Arc::new(IdentitySession::signed_in(viewer))
}

pub(super) fn router_with(repository: Arc<MemoryRepository>) -> axum::Router {
    job_router(repository, BoardSettings { page_size: 2 })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
