use metrics_exporter_prometheus::PrometheusHandle;
use smart_collection::workflows::statistics::{InMemoryStatistics, StatisticsError};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the statistics export when one is configured. Without a path the
/// store stays empty and the statistics endpoints answer 503.
pub(crate) fn load_statistics(path: Option<&Path>) -> Result<InMemoryStatistics, StatisticsError> {
    match path {
        Some(path) => InMemoryStatistics::from_path(path),
        None => {
            warn!("CBS_DATA_PATH not set; statistics endpoints will report unavailable");
            Ok(InMemoryStatistics::default())
        }
    }
}
