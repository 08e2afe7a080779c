use super::error::{ApiError, ErrorBody};
use super::request::{ApiRequest, Attempt, RetryExhausted};
use super::session::Session;
use crate::domain_model::{AccessToken, Listing, RefreshToken};
use crate::logger::*;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const REFRESH_ENDPOINT: &str = "/auth/token/refresh/";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

/// Create a builder for an [`ApiClient`] talking to `base_url`.
pub fn build(base_url: Url, session: Arc<Session>) -> ApiClientBuilder {
    ApiClientBuilder::new(base_url, session)
}

/// HTTP client for the events API.
///
/// Every call goes through [`ApiClient::execute`], which attaches the
/// session's bearer token and, on a 401, refreshes the token once and
/// replays the request.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
    request_timeout: Duration,
    refresh_timeout: Duration,
}

pub struct ApiClientBuilder {
    base_url: Url,
    session: Arc<Session>,
    request_timeout: Duration,
    refresh_timeout: Duration,
    http_client: Option<reqwest::Client>,
}

impl ApiClientBuilder {
    pub fn new(mut base_url: Url, session: Arc<Session>) -> Self {
        // Keep the last path segment when endpoints are joined on.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            base_url,
            session,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
            http_client: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http_client = Some(http);
        self
    }

    pub fn build(self) -> ApiClient {
        ApiClient {
            http: self.http_client.unwrap_or_default(),
            base_url: self.base_url,
            session: self.session,
            request_timeout: self.request_timeout,
            refresh_timeout: self.refresh_timeout,
        }
    }
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

impl ApiClient {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Send `request` and return its JSON body, or `None` when the backend
    /// answered with an empty success body.
    #[tracing::instrument(skip_all, fields(method = %request.method, endpoint = %request.endpoint))]
    pub async fn execute(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        let mut attempt = Attempt::Fresh;
        let mut token = if request.authenticate {
            self.session.access_token().await
        } else {
            None
        };

        loop {
            let response = self.send(&request, token.as_ref()).await?;
            let status = response.status();
            debug!(%status, ?attempt, "received response");

            if status == StatusCode::UNAUTHORIZED {
                if let Some(stale) = token.as_ref() {
                    match attempt.advance() {
                        Ok(next) => {
                            debug!("access token rejected, refreshing");
                            let fresh = self
                                .session
                                .refresh_after(stale, |refresh| self.exchange_refresh(refresh))
                                .await?;
                            attempt = next;
                            token = Some(fresh);
                            continue;
                        }
                        // The replay is never refreshed again; the 401 body
                        // goes back to the caller and the session is kept.
                        Err(RetryExhausted) => {
                            warn!("replayed request still unauthorized");
                        }
                    }
                }
            }

            return Self::read_body(&request.endpoint, response, self.request_timeout).await;
        }
    }

    /// Send `request` and decode its body as `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let endpoint = request.endpoint.clone();
        let body = self.execute(request).await?;
        decode(&endpoint, body)
    }

    /// Send `request` to a list endpoint, accepting plain and paginated lists.
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Vec<T>, ApiError> {
        self.fetch::<Listing<T>>(request)
            .await
            .map(Listing::into_items)
    }

    /// Send `request` for its side effect only.
    pub async fn dispatch(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }

    fn url(&self, endpoint: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    async fn send(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(&request.endpoint)?;

        let mut headers = request.headers.clone();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .headers(headers)
            .timeout(self.request_timeout);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder
            .send()
            .await
            .map_err(|err| transport_error(&url, err, self.request_timeout))
    }

    /// Trade the refresh token for a new access token. Sent outside the
    /// pipeline: no bearer header and no retry.
    async fn exchange_refresh(&self, refresh: RefreshToken) -> Result<AccessToken, ApiError> {
        let url = self.url(REFRESH_ENDPOINT)?;
        // One deadline for the whole exchange, body included: the refresh
        // gate is held until this returns.
        let exchange = async {
            let response = self
                .http
                .post(url.clone())
                .json(&RefreshRequest {
                    refresh: refresh.as_str(),
                })
                .timeout(self.refresh_timeout)
                .send()
                .await
                .map_err(|err| transport_error(&url, err, self.refresh_timeout))?;
            Self::read_body(REFRESH_ENDPOINT, response, self.refresh_timeout).await
        };

        let body = tokio::time::timeout(self.refresh_timeout, exchange)
            .await
            .map_err(|_| ApiError::Timeout {
                url: url.to_string(),
                timeout: self.refresh_timeout,
            })??;
        let RefreshResponse { access } = decode(REFRESH_ENDPOINT, body)?;
        if access.is_empty() {
            return Err(ApiError::Decode {
                endpoint: REFRESH_ENDPOINT.to_string(),
                message: "empty access token".to_string(),
            });
        }
        Ok(AccessToken::new(access))
    }

    async fn read_body(
        endpoint: &str,
        response: reqwest::Response,
        timeout: Duration,
    ) -> Result<Option<Value>, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = ErrorBody::parse(&text, status.canonical_reason().unwrap_or_default());
            debug!(%status, %body, "request failed");
            return Err(ApiError::Application {
                status: status.as_u16(),
                body,
            });
        }

        let url = response.url().clone();
        let text = response
            .text()
            .await
            .map_err(|err| transport_error(&url, err, timeout))?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            })
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: Option<Value>) -> Result<T, ApiError> {
    let body = body.ok_or_else(|| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: "empty response body".to_string(),
    })?;
    serde_json::from_value(body).map_err(|err| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    })
}

fn transport_error(url: &Url, err: reqwest::Error, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        ApiError::Network {
            url: url.to_string(),
            source: err,
        }
    }
}
