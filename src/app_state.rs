use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::core::client::metrics_source_trait::MetricsSource;
use crate::core::client::promql_client::PromQlClient;
use crate::core::util::date_util::{DateLabeler, SystemClock};
use crate::domain::graph::service::GraphService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub graph_service: Arc<GraphService>,
}

pub fn build_app_state(config: AppConfig) -> Result<AppState> {
    let labeler = DateLabeler::from_offset_minutes(config.tz_offset_minutes).unwrap_or_else(|| {
        warn!(offset = config.tz_offset_minutes, "label offset out of range, using UTC");
        DateLabeler::utc()
    });

    let source: Option<Arc<dyn MetricsSource>> = match config.promql_url.as_deref() {
        Some(url) => {
            info!(%url, "metrics backend configured");
            Some(Arc::new(PromQlClient::new(url)?) as Arc<dyn MetricsSource>)
        }
        None => {
            warn!("GRAPH_PROMQL_URL not set; energy graphs will return no data");
            None
        }
    };

    let graph_service = GraphService::new(
        labeler,
        Arc::new(SystemClock),
        source,
        config.default_locale.clone(),
    );

    Ok(AppState {
        config: Arc::new(config),
        graph_service: Arc::new(graph_service),
    })
}
