use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::{Poem, PoemQuery},
    error::SearchError,
};
use tracing::{debug, error, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://poetrydb.org";

/// Anything able to answer a [`PoemQuery`] with a list of poems.
#[async_trait]
pub trait PoemSource: Send + Sync {
    async fn find(&self, query: &PoemQuery) -> Result<Vec<Poem>, SearchError>;
}

/// Read-only client for the PoetryDB REST API.
///
/// Every lookup performs exactly one GET. Transport and status failures are
/// logged and collapsed into [`SearchError::RequestFailed`]; a successful
/// response that is not a list of poems becomes
/// [`SearchError::MalformedResponse`].
pub struct PoetryClient {
    http: Client,
    base_url: String,
}

impl Default for PoetryClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PoetryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, query: &PoemQuery) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.base_url, query.endpoint_path()))
    }

    pub async fn find_by_author(&self, author: &str) -> Result<Vec<Poem>, SearchError> {
        self.find(&PoemQuery::by_author(author)).await
    }

    pub async fn find_by_title(&self, title: &str) -> Result<Vec<Poem>, SearchError> {
        self.find(&PoemQuery::by_title(title)).await
    }

    pub async fn find_by_author_and_title(
        &self,
        author: &str,
        title: &str,
    ) -> Result<Vec<Poem>, SearchError> {
        self.find(&PoemQuery::by_author_and_title(author, title)).await
    }

    pub async fn find(&self, query: &PoemQuery) -> Result<Vec<Poem>, SearchError> {
        let mode = query.mode();
        let url = self.endpoint_url(query).map_err(|err| {
            error!(%mode, base_url = %self.base_url, error = %err, "failed to build poetry api url");
            SearchError::RequestFailed
        })?;
        debug!(%mode, %url, "requesting poems");

        let response = self.http.get(url.clone()).send().await.map_err(|err| {
            error!(%mode, %url, error = %err, "client-side or network error while fetching poems");
            SearchError::RequestFailed
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%mode, %url, status = status.as_u16(), %body, "poetry api returned an error status");
            return Err(SearchError::RequestFailed);
        }

        let body: Value = response.json().await.map_err(|err| {
            error!(%mode, %url, error = %err, "poetry api response body was not json");
            SearchError::RequestFailed
        })?;

        poems_from_body(query, body)
    }
}

#[async_trait]
impl PoemSource for PoetryClient {
    async fn find(&self, query: &PoemQuery) -> Result<Vec<Poem>, SearchError> {
        PoetryClient::find(self, query).await
    }
}

fn poems_from_body(query: &PoemQuery, body: Value) -> Result<Vec<Poem>, SearchError> {
    if !body.is_array() {
        warn!(mode = %query.mode(), %body, "poetry api did not return a list of poems");
        return Err(SearchError::malformed(query.malformed_response_message()));
    }

    serde_json::from_value(body).map_err(|err| {
        warn!(mode = %query.mode(), error = %err, "poetry api returned records that are not poems");
        SearchError::malformed(query.malformed_response_message())
    })
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
