use chrono::{DateTime, Duration, TimeZone, Utc};
use job_board::board::{
    Application, ApplicationId, ApplicationStatus, ApplicationSubmission, Company, Job, JobId,
    JobRepository, RepositoryError, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the hosted job store. Enforces one application per
/// candidate and rejects applications to closed postings.
#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    jobs: Arc<Mutex<BTreeMap<JobId, Job>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryJobRepository {
    pub(crate) fn with_jobs(jobs: impl IntoIterator<Item = Job>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.jobs.lock().expect("repository mutex poisoned");
            for job in jobs {
                guard.insert(job.id.clone(), job);
            }
        }
        let seeded = repository
            .jobs
            .lock()
            .expect("repository mutex poisoned")
            .values()
            .map(|job| job.applications.len() as u64)
            .sum::<u64>();
        repository.sequence.store(seeded + 1, Ordering::Relaxed);
        repository
    }

    pub(crate) fn seeded() -> Self {
        Self::with_jobs(demo_jobs())
    }

    fn next_application_id(&self) -> ApplicationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        ApplicationId(format!("app-{id:06}"))
    }
}

impl JobRepository for InMemoryJobRepository {
    async fn fetch_job(&self, job_id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let guard = self.jobs.lock().expect("repository mutex poisoned");
        Ok(guard.get(job_id).cloned())
    }

    async fn update_hiring_status(
        &self,
        job_id: &JobId,
        is_open: bool,
    ) -> Result<Job, RepositoryError> {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        let job = guard.get_mut(job_id).ok_or(RepositoryError::NotFound)?;
        job.is_open = is_open;
        Ok(job.clone())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        let guard = self.jobs.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    async fn create_application(
        &self,
        job_id: &JobId,
        submission: ApplicationSubmission,
    ) -> Result<Application, RepositoryError> {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        let job = guard.get_mut(job_id).ok_or(RepositoryError::NotFound)?;
        if !job.is_open {
            return Err(RepositoryError::Closed);
        }
        if job.has_applied(&submission.candidate_id) {
            return Err(RepositoryError::Conflict);
        }

        let application = Application {
            id: self.next_application_id(),
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

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, day, hour, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn seeded_application(
    id: usize,
    job_id: &str,
    candidate: (&str, &str),
    status: ApplicationStatus,
    created_at: DateTime<Utc>,
) -> Application {
    Application {
        id: ApplicationId(format!("app-{id:06}")),
        job_id: JobId::from(job_id),
        candidate_id: UserId::from(candidate.0),
        candidate_name: candidate.1.to_string(),
        status,
        created_at,
    }
}

/// Fixture catalogue served until a real job store is wired in.
pub(crate) fn demo_jobs() -> Vec<Job> {
    let company = |name: &str, logo: &str| Company {
        name: name.to_string(),
        logo_url: logo.to_string(),
    };

    let mut jobs = vec![
        Job {
            id: JobId::from("job-001"),
            title: "Backend Engineer (Rust)".to_string(),
            location: "Berlin".to_string(),
            description: "Build the services behind our logistics platform.".to_string(),
            requirements: "- 3+ years of Rust\n- Postgres\n- tokio".to_string(),
            is_open: true,
            recruiter_id: UserId::from("rec_hanna"),
            company: company("Cargonaut", "/logos/cargonaut.svg"),
            applications: vec![
                seeded_application(
                    1,
                    "job-001",
                    ("cand_lee", "Lee Park"),
                    ApplicationStatus::Interviewing,
                    at(2, 9),
                ),
                seeded_application(
                    2,
                    "job-001",
                    ("cand_sam", "Sam Ortiz"),
                    ApplicationStatus::Applied,
                    at(4, 15),
                ),
                seeded_application(
                    3,
                    "job-001",
                    ("cand_kim", "Kim Novak"),
                    ApplicationStatus::Rejected,
                    at(1, 11),
                ),
            ],
        },
        Job {
            id: JobId::from("job-002"),
            title: "Frontend Developer".to_string(),
            location: "Remote".to_string(),
            description: "Own the candidate-facing web experience.".to_string(),
            requirements: "- TypeScript\n- accessibility".to_string(),
            is_open: true,
            recruiter_id: UserId::from("rec_omar"),
            company: company("Brightlane", "/logos/brightlane.svg"),
            applications: vec![seeded_application(
                4,
                "job-002",
                ("cand_lee", "Lee Park"),
                ApplicationStatus::Hired,
                at(3, 10),
            )],
        },
        Job {
            id: JobId::from("job-003"),
            title: "Site Reliability Engineer".to_string(),
            location: "Amsterdam".to_string(),
            description: "Keep the platform fast and boring.".to_string(),
            requirements: "- Kubernetes\n- on-call experience".to_string(),
            is_open: false,
            recruiter_id: UserId::from("rec_hanna"),
            company: company("Cargonaut", "/logos/cargonaut.svg"),
            applications: Vec::new(),
        },
    ];

    let cities = ["Lisbon", "Remote", "Warsaw", "Berlin"];
    for index in 4..=14 {
        let posted = at(5, 8) + Duration::hours(index as i64);
        jobs.push(Job {
            id: JobId(format!("job-{index:03}")),
            title: format!("Software Engineer {}", index - 3),
            location: cities[index % cities.len()].to_string(),
            description: format!("General engineering role posted {}.", posted.date_naive()),
            requirements: "- curiosity\n- code review experience".to_string(),
            is_open: index % 3 != 0,
            recruiter_id: UserId::from("rec_omar"),
            company: company("Brightlane", "/logos/brightlane.svg"),
            applications: Vec::new(),
        });
    }

    jobs
}
