//! Shared HTTP transport for the collaborator clients.
//!
//! Attaches the bearer token, intercepts 401 for the single
//! refresh-and-retry pass, and maps non-success responses into the
//! error taxonomy. Every request retries at most once.

use crate::auth::{AuthSession, TokenPair};
use crate::config::ApiConfig;
use crate::error::{classify_response, ApiError, ApiResult};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Serialize)]
struct RefreshRequest {
    refresh_token: String,
}

pub(crate) struct Transport {
    http: reqwest::Client,
    config: ApiConfig,
    session: Arc<AuthSession>,
}

impl Transport {
    pub fn new(config: ApiConfig, session: Arc<AuthSession>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    // ========================================================================
    // Authorized JSON requests
    // ========================================================================

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send_json::<(), T>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send_json(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send_json(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send_no_content(Method::DELETE, path).await
    }

    /// Authorized request whose success responses carry no body.
    pub async fn send_no_content(&self, method: Method, path: &str) -> ApiResult<()> {
        let response = self.send_with_retry::<()>(method, path, None).await?;
        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            return Ok(());
        }
        let text = response.text().await?;
        Err(classify_response(status, &text))
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let response = self.send_with_retry(method, path, body).await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(classify_response(status, &text));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Issue the request; on 401 perform the single-flight refresh and
    /// retry exactly once.
    async fn send_with_retry<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<Response> {
        let token = self.session.access_token();
        let response = self
            .execute(method.clone(), path, body, token.as_deref())
            .await?;
        if response.status().as_u16() != 401 {
            return Ok(response);
        }

        debug!("401 on {} {}, attempting token refresh", method, path);
        let stale = token.unwrap_or_default();
        let fresh = self
            .session
            .refresh_once(&stale, |refresh_token| self.wire_refresh(refresh_token))
            .await?;

        let retry = self.execute(method, path, body, Some(&fresh)).await?;
        if retry.status().as_u16() == 401 {
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }
        Ok(retry)
    }

    async fn execute<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> ApiResult<Response> {
        let mut request = self.http.request(method, self.config.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    // ========================================================================
    // Unauthenticated requests (login, refresh)
    // ========================================================================

    pub async fn post_unauthenticated<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Response> {
        Ok(self
            .http
            .post(self.config.url(path))
            .json(body)
            .send()
            .await?)
    }

    /// The actual `POST /auth/refresh` wire call, invoked only by the
    /// single-flight leader inside `AuthSession::refresh_once`.
    async fn wire_refresh(&self, refresh_token: String) -> ApiResult<TokenPair> {
        let response = self
            .post_unauthenticated("/auth/refresh", &RefreshRequest { refresh_token })
            .await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(classify_response(status, &text));
        }
        Ok(serde_json::from_str(&text)?)
    }
}
