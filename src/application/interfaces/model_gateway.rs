use async_trait::async_trait;

use crate::domain::{DomainError, GenerationRequest};

/// The only seam through which the crate talks to a generative model.
///
/// Implementors own transport, credentials, vendor wire formats and
/// response decoding. Each call performs at most one network request:
/// no retries, no caching.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Run one completion and return the response text.
    ///
    /// Fails with [`DomainError::Transport`] when the service cannot be
    /// reached or rejects the call, and with [`DomainError::EmptyResponse`]
    /// when it answers without any text.
    async fn complete(&self, request: GenerationRequest) -> Result<String, DomainError>;

    /// Model identifier adapters should put into their requests.
    fn model(&self) -> &str;
}
