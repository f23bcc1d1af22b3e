use crate::cli::ServeArgs;
use crate::infra::{load_registry, AppState};
use crate::routes::with_service_routes;
use autotruth::config::AppConfig;
use autotruth::error::AppError;
use autotruth::scoring::TransparencyEngine;
use autotruth::service::TransparencyService;
use autotruth::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let engine = TransparencyEngine::new(config.data.scoring_config()?);
    let registry = Arc::new(load_registry(&config.data)?);
    let service = Arc::new(TransparencyService::new(engine, registry));

    let app = with_service_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "transparency scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
