use crate::cli::ServeArgs;
use crate::infra::{load_statistics, AppState};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use smart_collection::config::AppConfig;
use smart_collection::error::AppError;
use smart_collection::telemetry;
use smart_collection::workflows::collection::{
    debt_router, sample_cases, CollectionService, RemoteClassifier,
};
use smart_collection::workflows::statistics::statistics_router;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let classifier = RemoteClassifier::new(config.classifier.clone())?;
    info!(base_url = classifier.base_url(), "classification service configured");
    let collection = Arc::new(CollectionService::new(classifier, sample_cases()));

    let statistics = Arc::new(load_statistics(config.statistics.data_path.as_deref())?);

    let app = with_operational_routes(
        debt_router(collection).merge(statistics_router(
            statistics,
            config.statistics.default_year.clone(),
        )),
    )
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "smart collection service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
