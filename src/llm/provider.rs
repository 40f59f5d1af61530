use async_trait::async_trait;
use crate::errors::VantageError;
use super::types::ContentBlock;

#[async_trait]
pub trait ResearchProvider: Send + Sync {
    /// Run one research exchange: system + user prompt in, the ordered
    /// response content sequence out. Exactly one upstream call, no retries.
    async fn research(
        &self,
        system: &str,
        user: &str,
    ) -> Result<Vec<ContentBlock>, VantageError>;

    /// Model identifier for logging
    fn model_name(&self) -> &str;
}
