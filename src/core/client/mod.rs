// Metrics backend clients
pub mod metrics_source_trait;
pub mod promql_client;
