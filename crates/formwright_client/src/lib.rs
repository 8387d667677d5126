//! Typed REST clients for the Formwright collaborators.
//!
//! Three external systems back the builder: form persistence (with
//! append-only version history), menu management, and auth. All of them
//! speak JSON over HTTPS; all mutation failures here are surfaced to
//! the caller and never touch the in-memory schema state.
//!
//! Auth state is an explicit, injected [`AuthSession`] shared by every
//! client - see the module docs in [`auth`] for the single-flight
//! refresh discipline.

pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod menu;

mod transport;

pub use auth::{AuthClient, AuthSession, Credentials, TokenPair, UserProfile};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use forms::{FormRecord, FormSummary, FormVersion, FormsClient};
pub use menu::{MenuClient, MenuItem, MenuItemPayload, MenuNode};
