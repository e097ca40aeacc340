use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryJobRepository};
use crate::routes::with_job_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_board::board::BoardSettings;
use job_board::config::AppConfig;
use job_board::error::AppError;
use job_board::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryJobRepository::seeded());
    let settings = BoardSettings {
        page_size: config.board.page_size,
    };

    let app = with_job_routes(repository, settings)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, page_size = config.board.page_size, "job board ready");

    axum::serve(listener, app).await?;
    Ok(())
}
