//! ClickUp task store adapter.
//!
//! Talks to the ClickUp v2 REST API with a pre-acquired access token. Token
//! acquisition is out of scope; the token is handed in through
//! [`ClickUpConfig`].

mod models;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url, header::AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;

use crate::flow::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskQuery, TaskStore, TaskStoreError, TaskStoreResult},
};
use models::{ClickUpTask, ClickUpTaskPage, ClickUpUserEnvelope, StatusUpdate};

/// Public ClickUp v2 API root.
pub const DEFAULT_API_URL: &str = "https://api.clickup.com/api/v2/";

/// Per-request timeout applied by the HTTP client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the ClickUp API.
#[derive(Debug)]
pub struct ClickUpConfig {
    api_url: Url,
    token: SecretString,
    list_id: Option<String>,
}

impl ClickUpConfig {
    /// Creates settings for `api_url` authenticated with `token`.
    ///
    /// A trailing slash is added to the URL when missing so relative paths
    /// join beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the URL does not parse.
    pub fn new(api_url: &str, token: SecretString) -> TaskStoreResult<Self> {
        let normalized = if api_url.ends_with('/') {
            api_url.to_owned()
        } else {
            format!("{api_url}/")
        };
        let parsed = Url::parse(&normalized).map_err(TaskStoreError::transport)?;
        Ok(Self {
            api_url: parsed,
            token,
            list_id: None,
        })
    }

    /// Sets the list that task listings are scoped to.
    #[must_use]
    pub fn with_list_id(mut self, list_id: impl Into<String>) -> Self {
        self.list_id = Some(list_id.into());
        self
    }

    /// Returns the API root.
    #[must_use]
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Returns the configured list identifier.
    #[must_use]
    pub fn list_id(&self) -> Option<&str> {
        self.list_id.as_deref()
    }
}

/// Task store backed by the ClickUp REST API.
#[derive(Debug)]
pub struct ClickUpTaskStore {
    client: Client,
    config: ClickUpConfig,
}

impl ClickUpTaskStore {
    /// Creates a task store using `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: ClickUpConfig) -> TaskStoreResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TaskStoreError::transport)?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> TaskStoreResult<Url> {
        self.config
            .api_url
            .join(path)
            .map_err(TaskStoreError::transport)
    }

    async fn get(&self, url: Url) -> TaskStoreResult<Response> {
        self.client
            .get(url)
            .header(AUTHORIZATION, self.config.token.expose_secret())
            .send()
            .await
            .map_err(TaskStoreError::transport)
    }

    async fn current_user_id(&self) -> TaskStoreResult<u64> {
        let response = ensure_success(self.get(self.endpoint("user")?).await?).await?;
        let envelope: ClickUpUserEnvelope =
            response.json().await.map_err(TaskStoreError::transport)?;
        Ok(envelope.user.id)
    }
}

/// Converts non-success responses into [`TaskStoreError::Http`].
async fn ensure_success(response: Response) -> TaskStoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TaskStoreError::Http {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl TaskStore for ClickUpTaskStore {
    async fn find_by_id(&self, id: &TaskId) -> TaskStoreResult<Option<Task>> {
        debug!(task_id = %id, "fetching task from ClickUp");
        let response = self.get(self.endpoint(&format!("task/{id}"))?).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let payload: ClickUpTask = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(TaskStoreError::transport)?;
        Task::try_from(payload).map(Some)
    }

    async fn set_status(&self, id: &TaskId, status: TaskStatus) -> TaskStoreResult<()> {
        debug!(task_id = %id, status = %status, "updating ClickUp task status");
        let response = self
            .client
            .put(self.endpoint(&format!("task/{id}"))?)
            .header(AUTHORIZATION, self.config.token.expose_secret())
            .json(&StatusUpdate {
                status: status.label(),
            })
            .send()
            .await
            .map_err(TaskStoreError::transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(TaskStoreError::NotFound(id.clone()));
        }
        ensure_success(response).await.map(drop)
    }

    async fn list(&self, query: TaskQuery) -> TaskStoreResult<Vec<Task>> {
        let list_id = self
            .config
            .list_id
            .as_deref()
            .ok_or(TaskStoreError::MissingConfiguration("ClickUp list id"))?;
        let mut url = self.endpoint(&format!("list/{list_id}/task"))?;
        if query.is_assigned_to_me() {
            let user_id = self.current_user_id().await?;
            url.query_pairs_mut()
                .append_pair("assignees[]", &user_id.to_string());
        }
        debug!(%url, "listing ClickUp tasks");

        let page: ClickUpTaskPage = ensure_success(self.get(url).await?)
            .await?
            .json()
            .await
            .map_err(TaskStoreError::transport)?;
        page.tasks.into_iter().map(Task::try_from).collect()
    }
}
