//! Review request port.

use crate::flow::domain::ReviewRequest;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for review request operations.
pub type ReviewRequestResult<T> = Result<T, ReviewRequestError>;

/// Creates review requests between branches.
///
/// Creation is fire-and-forget: nothing about the request is read back.
#[async_trait]
pub trait ReviewRequestService: Send + Sync {
    /// Creates a review request.
    async fn create(&self, request: &ReviewRequest) -> ReviewRequestResult<()>;
}

/// Errors returned by review request adapters.
#[derive(Debug, Clone, Error)]
pub enum ReviewRequestError {
    /// No repository is configured to host the review.
    #[error("no repository configured for review requests")]
    MissingRepository,

    /// The review request could not be delivered.
    #[error("review request failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReviewRequestError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
