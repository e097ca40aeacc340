use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::applicants::{SortOrder, StatusFilter};
use super::detail::{DetailError, JobDetailController, JobPage};
use super::domain::{Application, JobId};
use super::identity::{HeaderIdentity, Viewer};
use super::listing;
use super::repository::{JobRepository, RepositoryError};
use crate::error::AppError;

pub const JOBS_PATH: &str = "/api/v1/jobs";

/// Listing knobs the router needs from configuration.
#[derive(Debug, Clone)]
pub struct BoardSettings {
    pub page_size: usize,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

pub(crate) struct BoardState<R> {
    repository: Arc<R>,
    settings: BoardSettings,
}

impl<R> Clone for BoardState<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            settings: self.settings.clone(),
        }
    }
}

/// Router builder exposing the listing and job detail endpoints.
pub fn job_router<R>(repository: Arc<R>, settings: BoardSettings) -> Router
where
    R: JobRepository + 'static,
{
    Router::new()
        .route(JOBS_PATH, get(list_handler::<R>))
        .route("/api/v1/jobs/:job_id", get(detail_handler::<R>))
        .route(
            "/api/v1/jobs/:job_id/hiring-status",
            post(toggle_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/applications",
            post(apply_handler::<R>),
        )
        .with_state(BoardState {
            repository,
            settings,
        })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DetailQuery {
    #[serde(default)]
    sort_by: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApplyRequest {
    pub candidate_name: String,
}

#[derive(Debug, Serialize)]
struct ApplyResponse {
    application: Application,
    page: JobPage,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn board_failure(err: impl Into<AppError>) -> Response {
    let err = err.into();
    warn!(error = %err, "job board request failed");
    err.into_response()
}

fn page_response(page: JobPage) -> Response {
    let status = match page {
        JobPage::NotFound { .. } => StatusCode::NOT_FOUND,
        JobPage::Loading | JobPage::Ready(_) => StatusCode::OK,
    };
    (status, Json(page)).into_response()
}

type Controller<R> = JobDetailController<R, HeaderIdentity>;

/// Builds a controller for the signed-in viewer and runs the initial fetch.
async fn loaded_controller<R>(
    state: &BoardState<R>,
    job_id: String,
    headers: &HeaderMap,
) -> Result<(Controller<R>, Viewer), Response>
where
    R: JobRepository + 'static,
{
    let identity = HeaderIdentity::from_headers(headers);
    let viewer = identity
        .viewer()
        .cloned()
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "sign in to view jobs"))?;

    let mut controller = JobDetailController::new(
        Arc::clone(&state.repository),
        Arc::new(identity),
        JobId(job_id),
    );
    controller
        .load()
        .await
        .map_err(board_failure)?;
    Ok((controller, viewer))
}

pub(crate) async fn list_handler<R>(
    State(state): State<BoardState<R>>,
    Query(params): Query<ListQuery>,
) -> Response
where
    R: JobRepository + 'static,
{
    match state.repository.list_jobs().await {
        Ok(jobs) => {
            let query = params.q.as_deref();
            let listing = listing::list(
                &jobs,
                query,
                params.page.unwrap_or(1),
                state.settings.page_size,
                &listing::search_href(JOBS_PATH, query),
            );
            (StatusCode::OK, Json(listing)).into_response()
        }
        Err(err) => board_failure(err),
    }
}

pub(crate) async fn detail_handler<R>(
    State(state): State<BoardState<R>>,
    Path(job_id): Path<String>,
    Query(params): Query<DetailQuery>,
    headers: HeaderMap,
) -> Response
where
    R: JobRepository + 'static,
{
    let sort_by = match params.sort_by.as_deref().map(str::parse::<SortOrder>) {
        Some(Ok(sort_by)) => sort_by,
        Some(Err(err)) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
        None => SortOrder::default(),
    };
    let status_filter = match params.status.as_deref().map(str::parse::<StatusFilter>) {
        Some(Ok(filter)) => filter,
        Some(Err(err)) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
        None => StatusFilter::default(),
    };

    let (mut controller, _) = match loaded_controller(&state, job_id, &headers).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };
    controller.set_sort_by(sort_by);
    controller.set_status_filter(status_filter);

    page_response(controller.render())
}

pub(crate) async fn toggle_handler<R>(
    State(state): State<BoardState<R>>,
    Path(job_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: JobRepository + 'static,
{
    let (mut controller, viewer) = match loaded_controller(&state, job_id, &headers).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let Some(job) = controller.job() else {
        return page_response(JobPage::not_found());
    };
    if !job.is_recruiter(&viewer.id) {
        return error_response(
            StatusCode::FORBIDDEN,
            "only the posting recruiter can change hiring status",
        );
    }

    match controller.toggle_hiring_status().await {
        Ok(()) => page_response(controller.render()),
        Err(DetailError::Repository(RepositoryError::NotFound)) => {
            page_response(JobPage::not_found())
        }
        Err(err) => board_failure(err),
    }
}

pub(crate) async fn apply_handler<R>(
    State(state): State<BoardState<R>>,
    Path(job_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ApplyRequest>,
) -> Response
where
    R: JobRepository + 'static,
{
    let (mut controller, viewer) = match loaded_controller(&state, job_id, &headers).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if controller.job().is_none() {
        return page_response(JobPage::not_found());
    }
    if viewer.is_recruiter() {
        return error_response(StatusCode::FORBIDDEN, "recruiters cannot apply to jobs");
    }

    match controller.apply(request.candidate_name).await {
        Ok(application) => {
            let body = ApplyResponse {
                application,
                page: controller.render(),
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(DetailError::Repository(RepositoryError::NotFound)) => {
            page_response(JobPage::not_found())
        }
        Err(err) => board_failure(err),
    }
}
