//! Recording review request service for workflow tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::flow::{
    domain::ReviewRequest,
    ports::{ReviewRequestError, ReviewRequestResult, ReviewRequestService},
};

/// Review request service that remembers every request it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingReviewService {
    requests: Arc<RwLock<Vec<ReviewRequest>>>,
}

impl RecordingReviewService {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the requests created so far.
    ///
    /// # Errors
    ///
    /// Returns a delivery error when lock acquisition fails.
    pub fn requests(&self) -> ReviewRequestResult<Vec<ReviewRequest>> {
        let requests = self.requests.read().map_err(|err| {
            ReviewRequestError::delivery(std::io::Error::other(err.to_string()))
        })?;
        Ok(requests.clone())
    }
}

#[async_trait]
impl ReviewRequestService for RecordingReviewService {
    async fn create(&self, request: &ReviewRequest) -> ReviewRequestResult<()> {
        let mut requests = self.requests.write().map_err(|err| {
            ReviewRequestError::delivery(std::io::Error::other(err.to_string()))
        })?;
        requests.push(request.clone());
        Ok(())
    }
}
