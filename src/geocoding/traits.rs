use super::types::GeocodeResponse;
use anyhow::Result;
use async_trait::async_trait;

/// A place-search backend. Implementations return the decoded response or
/// an error; turning failures into fallbacks is the caller's job.
#[async_trait]
pub trait GeocodeTransport: Send + Sync {
    /// Look up free-text `query`
    async fn search(&self, query: &str) -> Result<GeocodeResponse>;

    /// Get the name of the geocoding provider
    fn source_name(&self) -> &'static str;
}
