//! Auth Session and Client
//!
//! Bearer-token bootstrap against the auth collaborator. The token
//! lives in an explicit [`AuthSession`] object that is injected into
//! every client - never ambient module state - with plain
//! `get/set/clear` semantics.
//!
//! Refresh is single-flight: concurrent 401s funnel through one gate,
//! the first caller performs the wire refresh, and the rest observe the
//! replaced token instead of issuing parallel refreshes.

use crate::config::ApiConfig;
use crate::error::{classify_response, ApiError, ApiResult};
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Tokens returned by login and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

/// Login request payload.
#[derive(Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The signed-in user, as reported by `GET /auth/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub roles: Vec<String>,
}

#[derive(Default)]
struct TokenState {
    access: Option<String>,
    refresh: Option<String>,
}

/// Explicit token state for one signed-in user.
///
/// Shared behind an `Arc` by every client talking to the same backend.
/// Token reads/writes are synchronous; only the refresh gate is async.
pub struct AuthSession {
    tokens: Mutex<TokenState>,
    refresh_gate: tokio::sync::Mutex<()>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(TokenState::default()),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.lock().access.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.lock().refresh.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().access.is_some()
    }

    pub fn set_tokens(&self, pair: &TokenPair) {
        let mut state = self.lock();
        state.access = Some(pair.access_token.clone());
        state.refresh = Some(pair.refresh_token.clone());
    }

    /// Drop all tokens (logged-out state).
    pub fn clear(&self) {
        let mut state = self.lock();
        state.access = None;
        state.refresh = None;
    }

    /// Single-flight refresh.
    ///
    /// `stale_access` is the token the caller's request failed with.
    /// Callers queue on the gate; whoever enters first and still holds
    /// the stale token runs `do_refresh` with the current refresh
    /// token. Everyone queued behind them finds the token already
    /// replaced and returns it without a wire call.
    ///
    /// A rejected refresh clears the session (logged-out state); a
    /// transport failure is propagated without clearing, since it says
    /// nothing about the tokens themselves.
    pub async fn refresh_once<F, Fut>(&self, stale_access: &str, do_refresh: F) -> ApiResult<String>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = ApiResult<TokenPair>>,
    {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.access_token() {
            if current != stale_access {
                debug!("Refresh already performed by a concurrent request");
                return Ok(current);
            }
        }

        let Some(refresh) = self.refresh_token() else {
            self.clear();
            return Err(ApiError::Unauthorized);
        };

        match do_refresh(refresh).await {
            Ok(pair) => {
                let access = pair.access_token.clone();
                self.set_tokens(&pair);
                debug!("Access token refreshed");
                Ok(access)
            }
            Err(ApiError::Network(err)) => Err(ApiError::Network(err)),
            Err(err) => {
                warn!("Token refresh rejected, clearing session: {}", err);
                self.clear();
                Err(ApiError::Unauthorized)
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TokenState> {
        // Token state is plain data; a poisoned lock only means a
        // panicking thread mid-update, and the strings are still valid.
        self.tokens.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the auth collaborator endpoints.
pub struct AuthClient {
    transport: Transport,
}

impl AuthClient {
    pub fn new(config: ApiConfig, session: Arc<AuthSession>) -> ApiResult<Self> {
        Ok(Self {
            transport: Transport::new(config, session)?,
        })
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        self.transport.session()
    }

    /// `POST /auth/login` - stores the returned tokens in the session.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<()> {
        let response = self
            .transport
            .post_unauthenticated("/auth/login", credentials)
            .await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if status == 401 {
            return Err(ApiError::Unauthorized);
        }
        if !(200..300).contains(&status) {
            return Err(classify_response(status, &text));
        }

        let pair: TokenPair = serde_json::from_str(&text)?;
        self.session().set_tokens(&pair);
        Ok(())
    }

    /// `POST /auth/logout` - best-effort server side, always clears the
    /// local session.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self
            .transport
            .send_no_content(reqwest::Method::POST, "/auth/logout")
            .await;
        self.session().clear();
        match result {
            // A dead session on the server is still a successful logout
            // from the caller's point of view.
            Err(ApiError::Unauthorized) => Ok(()),
            other => other,
        }
    }

    /// `GET /auth/me` - profile of the signed-in user, with the standard
    /// refresh-on-401 retry.
    pub async fn me(&self) -> ApiResult<UserProfile> {
        self.transport.get("/auth/me").await
    }
}
