//! Main ApiClient

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::envelope::{Listing, Page};
use crate::error::ApiError;
use crate::model::{Membership, ProjectMember};
use crate::query::ListQuery;

/// Client for the staff API.
///
/// Cheap to clone (uses `Arc` internally). Tokens are passed per call so one
/// client can serve whichever [`Session`](crate::Session) is current.
///
/// # Example
///
/// ```ignore
/// let client = ApiClient::builder()
///     .url("https://api.example.com/v1")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let orgs = client.organizations(token).await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Resolve `path` below the base URL and attach the query pairs.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{joined}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// GET `path` with bearer auth and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path, query)?;
        debug!("GET {}", url.path());

        let mut request = self.inner.http_client.get(url).bearer_auth(token);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            debug!("GET {} -> {}", path, status.as_u16());
            return Err(ApiError::http(status.as_u16(), message));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::parse_with_body(e.to_string(), body))
    }

    /// Organizations the token's account belongs to.
    pub async fn organizations(&self, token: &str) -> Result<Vec<Membership>, ApiError> {
        let listing: Listing<Membership> = self.get_json(token, "/organization", &[]).await?;
        Ok(listing.into_items())
    }

    pub async fn project_members(
        &self,
        token: &str,
        project_id: &str,
        query: &ListQuery,
    ) -> Result<Page<ProjectMember>, ApiError> {
        let path = format!("/projects/{}/members", project_id);
        self.get_json(token, &path, &query.to_pairs()).await
    }
}

/// Builder for [`ApiClient`].
#[derive(Default)]
pub struct ApiClientBuilder {
    url: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured reqwest client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let raw = self
            .url
            .ok_or_else(|| ApiError::InvalidUrl("no base URL".to_string()))?;
        let base_url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(raw));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => Client::builder().build()?,
        };

        Ok(ApiClient {
            inner: Arc::new(ApiClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
