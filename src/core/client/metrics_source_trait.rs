use async_trait::async_trait;

use crate::domain::promql::model::{PromQlParams, PromQlResponse};

/// Backend answering Prometheus-style range queries.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn query_range(&self, params: &PromQlParams) -> anyhow::Result<PromQlResponse>;
}
