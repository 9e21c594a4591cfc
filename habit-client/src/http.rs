//! HTTP transport for the habit API
//!
//! Every authenticated request reads the bearer token from the
//! [`SessionGate`] first; with no token the request is never sent.
//!
//! Paths are given as segments. Each one is percent-encoded on its own, so an
//! id containing `/`, `?` or `#` cannot address a different resource.

use crate::{ClientConfig, ClientError, ClientResult, SessionGate};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// HTTP client for making network requests to the habit API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    session: SessionGate,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig, session: SessionGate) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                ClientError::validation(format!("Invalid base URL: {}", config.base_url))
            })?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::validation("Base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build a request carrying the session's bearer token
    async fn authorized(&self, method: Method, path: &[&str]) -> ClientResult<RequestBuilder> {
        let token = self
            .session
            .current_token()
            .await
            .ok_or_else(|| ClientError::unauthorized("Not logged in"))?;

        let url = self.url(path)?;
        tracing::debug!(%method, path = url.path(), "Sending request");
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> ClientResult<T> {
        let request = self.authorized(Method::GET, path).await?;
        Self::handle_response(request.send().await?).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &[&str],
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(Method::POST, path).await?.json(body);
        Self::handle_response(request.send().await?).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &[&str],
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(Method::PUT, path).await?.json(body);
        Self::handle_response(request.send().await?).await
    }

    /// Make a DELETE request; any response body is ignored
    pub async fn delete(&self, path: &[&str]) -> ClientResult<()> {
        let request = self.authorized(Method::DELETE, path).await?;
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    /// POST without credentials (login)
    pub async fn post_public<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &[&str],
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path)?;
        tracing::debug!(method = "POST", path = url.path(), "Sending unauthenticated request");
        let request = self.client.post(url).json(body);
        Self::handle_response(request.send().await?).await
    }

    /// Turn a non-success status into the matching [`ClientError`]
    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let err = ClientError::from_status(status, &text);
        tracing::debug!(%status, error = %err, "Request failed");
        Err(err)
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
