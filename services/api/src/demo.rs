use crate::infra::InMemoryJobRepository;
use clap::Args;
use job_board::board::debounce::Debounced;
use job_board::board::detail::JobDetailView;
use job_board::board::listing::{self, JobListing};
use job_board::board::{
    ApplicationStatus, IdentitySession, JobDetailController, JobId, JobPage, JobRepository,
    SortOrder, StatusFilter, Viewer,
};
use job_board::config::AppConfig;
use job_board::error::AppError;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Jobs per listing page (defaults to APP_PAGE_SIZE)
    #[arg(long)]
    pub(crate) page_size: Option<usize>,
    /// Search typed into the listing, one keystroke at a time
    #[arg(long, default_value = "berlin")]
    pub(crate) search: String,
    /// Job shown on the detail page
    #[arg(long, default_value = "job-001")]
    pub(crate) job_id: String,
    /// Debounce applied to the search input in milliseconds (defaults to
    /// APP_SEARCH_DEBOUNCE_MS)
    #[arg(long)]
    pub(crate) debounce_ms: Option<u64>,
    /// Skip the apply and hiring status steps
    #[arg(long)]
    pub(crate) read_only: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        page_size,
        search,
        job_id,
        debounce_ms,
        read_only,
    } = args;

    let config = AppConfig::load()?;
    let page_size = page_size.unwrap_or(config.board.page_size).max(1);
    let delay = debounce_ms
        .map(Duration::from_millis)
        .unwrap_or(config.board.search_debounce);

    let repository = Arc::new(InMemoryJobRepository::seeded());
    let jobs = repository.list_jobs().await?;

    println!("Job board demo");
    let first = listing::list(&jobs, None, 1, page_size, "/jobs");
    render_listing("Listing, first page", &first);
    let last_page = first.pagination.total_pages;
    render_listing(
        "Listing, last page",
        &listing::list(&jobs, None, last_page, page_size, "/jobs"),
    );

    let mut query = Debounced::with_delay(String::new(), delay);
    let mut committed = query.subscribe();
    let mut typed = String::new();
    for keystroke in search.chars() {
        typed.push(keystroke);
        query.set(typed.clone());
        tokio::time::sleep(delay / 4).await;
    }
    if !search.is_empty() && committed.changed().await.is_ok() {
        let term = committed.borrow_and_update().clone();
        println!(
            "\nSearch: {} keystrokes debounced into one query '{}'",
            search.chars().count(),
            term
        );
        render_listing(
            "Search results",
            &listing::list(
                &jobs,
                Some(&term),
                1,
                page_size,
                &listing::search_href("/jobs", Some(&term)),
            ),
        );
    }

    let job_id = JobId(job_id);
    let recruiter_id = match repository.fetch_job(&job_id).await? {
        Some(job) => job.recruiter_id,
        None => {
            println!("\n{}: Job not found", job_id.0);
            return Ok(());
        }
    };

    let mut recruiter = JobDetailController::new(
        repository.clone(),
        Arc::new(IdentitySession::signed_in(Viewer::recruiter(&recruiter_id.0))),
        job_id.clone(),
    );
    recruiter.load().await?;
    println!("\nDetail page as the posting recruiter");
    render_page(&recruiter.render());

    recruiter.set_sort_by(SortOrder::Oldest);
    recruiter.set_status_filter(StatusFilter::Only(ApplicationStatus::Applied));
    println!("\nApplicants, oldest first, status applied only");
    render_page(&recruiter.render());
    recruiter.set_status_filter(StatusFilter::All);

    let mut candidate = JobDetailController::new(
        repository.clone(),
        Arc::new(IdentitySession::signed_in(Viewer::candidate("cand_demo"))),
        job_id.clone(),
    );
    candidate.load().await?;
    println!("\nDetail page as a candidate");
    render_page(&candidate.render());

    if read_only {
        return Ok(());
    }

    match candidate.apply("Demo Candidate".to_string()).await {
        Ok(application) => println!(
            "\nCandidate applied: {} ({})",
            application.id.0,
            application.status.label()
        ),
        Err(err) => println!("\nCandidate could not apply: {err}"),
    }

    recruiter.toggle_hiring_status().await?;
    println!("\nRecruiter toggled hiring status");
    render_page(&recruiter.render());

    Ok(())
}

fn render_listing(heading: &str, listing: &JobListing) {
    println!("\n{heading}");
    let pages: Vec<String> = listing
        .links
        .iter()
        .map(|link| match (link.active, link.disabled) {
            (true, _) => format!("[{}]", link.label),
            (false, true) => format!("({})", link.label),
            (false, false) => link.label.clone(),
        })
        .collect();
    println!(
        "Pages: {} | {} matching jobs",
        pages.join(" "),
        listing.total_jobs
    );
    for job in &listing.jobs {
        let status = if job.is_open { "open" } else { "closed" };
        println!(
            "- {} | {} | {} | {} | {} applicants",
            job.id.0, job.title, job.location, status, job.applicants
        );
    }
}

fn render_page(page: &JobPage) {
    match page {
        JobPage::Loading => println!("(loading)"),
        JobPage::NotFound { message } => println!("{message}"),
        JobPage::Ready(detail) => render_detail(detail),
    }
}

fn render_detail(detail: &JobDetailView) {
    println!(
        "{} at {} ({}) | {} | {} applicants",
        detail.title, detail.company, detail.location, detail.hiring_status, detail.applicant_count
    );
    if let Some(control) = &detail.hiring_status_control {
        println!("  Control: {}", control.placeholder);
    }
    if let Some(apply) = &detail.apply {
        let state = if apply.disabled { "disabled" } else { "enabled" };
        println!("  Apply button: {} ({state})", apply.label);
    }
    if let Some(panel) = &detail.applicants {
        println!(
            "  Applicants sorted {} filtered {}",
            panel.sort_by.value(),
            panel.status_filter
        );
        for application in &panel.applications {
            println!(
                "    - {} | {} | {}",
                application.candidate_name,
                application.status.label(),
                application.created_at.format("%Y-%m-%d %H:%M")
            );
        }
    }
}
