//! GitHub review request adapter.
//!
//! Review requests are delivered as compare links written to an output sink;
//! the user opens the link to create the pull request.

use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use tracing::info;

use crate::flow::{
    domain::{RepositoryFullName, ReviewRequest},
    ports::{ReviewRequestError, ReviewRequestResult, ReviewRequestService},
};

/// Review request service that prints GitHub compare links.
#[derive(Debug)]
pub struct GitHubCompareLinks<W> {
    repository: Option<RepositoryFullName>,
    sink: Mutex<W>,
}

impl<W> GitHubCompareLinks<W>
where
    W: Write + Send,
{
    /// Creates a link printer for `repository` writing to `sink`.
    ///
    /// Without a repository every request fails with
    /// [`ReviewRequestError::MissingRepository`].
    #[must_use]
    pub const fn new(repository: Option<RepositoryFullName>, sink: W) -> Self {
        Self {
            repository,
            sink: Mutex::new(sink),
        }
    }

    /// Runs `inspect` against the sink.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRequestError::Delivery`] when the sink lock is
    /// poisoned.
    pub fn with_sink<T>(&self, inspect: impl FnOnce(&W) -> T) -> ReviewRequestResult<T> {
        let sink = self.sink.lock().map_err(|err| {
            ReviewRequestError::delivery(std::io::Error::other(err.to_string()))
        })?;
        Ok(inspect(&sink))
    }
}

#[async_trait]
impl<W> ReviewRequestService for GitHubCompareLinks<W>
where
    W: Write + Send,
{
    async fn create(&self, request: &ReviewRequest) -> ReviewRequestResult<()> {
        let repository = self
            .repository
            .as_ref()
            .ok_or(ReviewRequestError::MissingRepository)?;
        let url = request.compare_url(repository);
        info!(%url, head = %request.head(), base = %request.base(), "review link created");

        let mut sink = self.sink.lock().map_err(|err| {
            ReviewRequestError::delivery(std::io::Error::other(err.to_string()))
        })?;
        writeln!(sink, "Please visit this URL to create pull request: {url}")
            .and_then(|()| sink.flush())
            .map_err(ReviewRequestError::delivery)
    }
}
