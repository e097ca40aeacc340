//! Integration scenarios for the job detail page driven through the public facade: a
//! recruiter reviews applicants and closes hiring while a candidate applies.

mod common {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::{Duration, TimeZone, Utc};

    use job_board::board::{
        Application, ApplicationId, ApplicationStatus, ApplicationSubmission, Company, Job,
        JobId, JobRepository, RepositoryError, UserId,
    };

    #[derive(Default)]
    pub(super) struct SharedBoard {
        jobs: Mutex<HashMap<JobId, Job>>,
    }

    impl SharedBoard {
        pub(super) fn seeded() -> Self {
            let board = Self::default();
            board
                .jobs
                .lock()
                .expect("board mutex poisoned")
                .insert(JobId::from("job-7"), posting());
            board
        }
    }

    impl JobRepository for SharedBoard {
        async fn fetch_job(&self, job_id: &JobId) -> Result<Option<Job>, RepositoryError> {
            Ok(self
                .jobs
                .lock()
                .expect("board mutex poisoned")
                .get(job_id)
                .cloned())
        }

        async fn update_hiring_status(
            &self,
            job_id: &JobId,
            is_open: bool,
        ) -> Result<Job, RepositoryError> {
            let mut guard = self.jobs.lock().expect("board mutex poisoned");
            let job = guard.get_mut(job_id).ok_or(RepositoryError::NotFound)?;
            job.is_open = is_open;
            Ok(job.clone())
        }

        async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
            Ok(self
                .jobs
                .lock()
                .expect("board mutex poisoned")
                .values()
                .cloned()
                .collect())
        }

        async fn create_application(
            &self,
            job_id: &JobId,
            submission: ApplicationSubmission,
        ) -> Result<Application, RepositoryError> {
            let mut guard = self.jobs.lock().expect("board mutex poisoned");
            let job = guard.get_mut(job_id).ok_or(RepositoryError::NotFound)?;
            if !job.is_open {
                return Err(RepositoryError::Closed);
            }
            let application = Application {
                id: ApplicationId(format!("app-{}", job.applications.len() + 1)),
                job_id: job_id.clone(),
                candidate_id: submission.candidate_id,
                candidate_name: submission.candidate_name,
                status: ApplicationStatus::Applied,
                created_at: latest(job) + Duration::hours(1),
            };
            job.applications.push(application.clone());
            Ok(application)
        }
    }

    fn latest(job: &Job) -> chrono::DateTime<Utc> {
        job.applications
            .iter()
            .map(|application| application.created_at)
            .max()
            .unwrap_or_else(|| Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    fn posting() -> Job {
        let applied_at = Utc
            .with_ymd_and_hms(2025, 2, 10, 8, 30, 0)
            .single()
            .expect("valid timestamp");
        Job {
            id: JobId::from("job-7"),
            title: "Embedded Rust Developer".to_string(),
            location: "Munich".to_string(),
            description: "Firmware for industrial sensors.".to_string(),
            requirements: "## Must have\n- no_std experience".to_string(),
            is_open: true,
            recruiter_id: UserId::from("rec_mia"),
            company: Company {
                name: "Sensorik GmbH".to_string(),
                logo_url: "/logos/sensorik.png".to_string(),
            },
            applications: vec![Application {
                id: ApplicationId("app-1".to_string()),
                job_id: JobId::from("job-7"),
                candidate_id: UserId::from("cand_tom"),
                candidate_name: "Tom".to_string(),
                status: ApplicationStatus::Interviewing,
                created_at: applied_at,
            }],
        }
    }
}

use std::sync::Arc;

use common::SharedBoard;
use job_board::board::{
    ApplicationStatus, DetailError, IdentitySession, JobDetailController, JobId, JobPage,
    RepositoryError, SortOrder, StatusFilter, Viewer,
};

#[tokio::test]
async fn candidate_application_reaches_the_recruiter() {
    let board = Arc::new(SharedBoard::seeded());

    let mut candidate = JobDetailController::new(
        board.clone(),
        Arc::new(IdentitySession::signed_in(Viewer::candidate("cand_ana"))),
        JobId::from("job-7"),
    );
    candidate.load().await.expect("candidate loads job");
    let page = candidate.render();
    let detail = page.detail().expect("job rendered");
    assert!(detail.hiring_status_control.is_none());
    assert!(detail.applicants.is_none());
    assert_eq!(detail.apply.as_ref().map(|apply| apply.label), Some("Apply"));

    candidate
        .apply("Ana".to_string())
        .await
        .expect("application accepted");

    let mut recruiter = JobDetailController::new(
        board.clone(),
        Arc::new(IdentitySession::signed_in(Viewer::recruiter("rec_mia"))),
        JobId::from("job-7"),
    );
    recruiter.load().await.expect("recruiter loads job");
    let page = recruiter.render();
    let panel = page
        .detail()
        .and_then(|detail| detail.applicants.as_ref())
        .expect("owner sees applicants");
    let names: Vec<&str> = panel
        .applications
        .iter()
        .map(|application| application.candidate_name.as_str())
        .collect();
    assert_eq!(names, vec!["Ana", "Tom"]);

    recruiter.set_sort_by(SortOrder::Oldest);
    recruiter.set_status_filter(StatusFilter::Only(ApplicationStatus::Applied));
    assert_eq!(recruiter.applicants().len(), 1);
    assert_eq!(recruiter.applicants()[0].candidate_name, "Ana");
}

#[tokio::test]
async fn closing_hiring_blocks_new_applications() {
    let board = Arc::new(SharedBoard::seeded());

    let mut recruiter = JobDetailController::new(
        board.clone(),
        Arc::new(IdentitySession::signed_in(Viewer::recruiter("rec_mia"))),
        JobId::from("job-7"),
    );
    recruiter.load().await.expect("recruiter loads job");
    recruiter
        .toggle_hiring_status()
        .await
        .expect("hiring closed");
    assert!(matches!(
        recruiter.render(),
        JobPage::Ready(ref detail) if !detail.is_open
    ));

    let mut candidate = JobDetailController::new(
        board,
        Arc::new(IdentitySession::signed_in(Viewer::candidate("cand_ana"))),
        JobId::from("job-7"),
    );
    candidate.load().await.expect("candidate loads job");
    let page = candidate.render();
    let apply = page
        .detail()
        .and_then(|detail| detail.apply.as_ref())
        .expect("apply shown");
    assert!(apply.disabled);

    assert!(matches!(
        candidate.apply("Ana".to_string()).await,
        Err(DetailError::Repository(RepositoryError::Closed))
    ));
}
