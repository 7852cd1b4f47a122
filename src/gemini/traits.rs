use crate::error::Result;
use crate::models::{DescribeRequest, DescribeResult, PromptRequest, PromptResult};
use async_trait::async_trait;

/// Generation Gateway seam. The orchestrator drives this trait so tests can
/// substitute a double and assert how many calls were placed.
#[async_trait]
pub trait PromptGateway: Send + Sync {
    async fn generate(
        &self,
        request: &PromptRequest,
        user_key: Option<&str>,
    ) -> Result<PromptResult>;
}

/// Image Description Gateway seam.
#[async_trait]
pub trait DescribeGateway: Send + Sync {
    async fn describe(
        &self,
        request: &DescribeRequest,
        user_key: Option<&str>,
    ) -> Result<DescribeResult>;
}
