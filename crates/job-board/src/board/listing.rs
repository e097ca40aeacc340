use serde::Serialize;

use super::domain::{Job, JobId};
use super::pagination::{PageLink, PageWindow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub location: String,
    pub company: String,
    pub logo_url: String,
    pub is_open: bool,
    pub applicants: usize,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            location: job.location.clone(),
            company: job.company.name.clone(),
            logo_url: job.company.logo_url.clone(),
            is_open: job.is_open,
            applicants: job.applications.len(),
        }
    }
}

/// One page of the job listing together with its pager.
#[derive(Debug, Clone, Serialize)]
pub struct JobListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub total_jobs: usize,
    pub pagination: PageWindow,
    pub links: Vec<PageLink>,
    pub jobs: Vec<JobSummary>,
}

/// Case-insensitive substring match on title, location and company name. Blank
/// queries match everything.
pub fn matches_query(job: &Job, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [&job.title, &job.location, &job.company.name]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn total_pages(matches: usize, page_size: usize) -> u32 {
    let page_size = page_size.max(1);
    u32::try_from(matches.div_ceil(page_size)).unwrap_or(u32::MAX)
}

/// Listing URL carrying the search term, percent-encoded for a query string.
/// Blank queries yield `base` unchanged.
pub fn search_href(base: &str, query: Option<&str>) -> String {
    match query.map(str::trim).filter(|query| !query.is_empty()) {
        Some(query) => format!("{base}?q={}", encode_query_value(query)),
        None => base.to_string(),
    }
}

fn encode_query_value(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            b' ' => encoded.push('+'),
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}

/// Builds the requested page. Out-of-range pages clamp into `[1, total_pages]`.
pub fn list(
    jobs: &[Job],
    query: Option<&str>,
    page: u32,
    page_size: usize,
    href: &str,
) -> JobListing {
    let page_size = page_size.max(1);
    let query = query.map(str::trim).filter(|query| !query.is_empty());
    let matching: Vec<&Job> = jobs
        .iter()
        .filter(|job| query.map_or(true, |query| matches_query(job, query)))
        .collect();

    let total = total_pages(matching.len(), page_size);
    let active = page.clamp(1, total.max(1));
    let offset = (active as usize - 1) * page_size;

    let summaries = matching
        .iter()
        .skip(offset)
        .take(page_size)
        .map(|job| JobSummary::from(*job))
        .collect();

    let pagination = PageWindow::compute(active, total);
    let links = pagination.links(href);

    JobListing {
        query: query.map(str::to_string),
        total_jobs: matching.len(),
        pagination,
        links,
        jobs: summaries,
    }
}
