//! Forms Persistence Client
//!
//! Typed client for the external form storage collaborator. Saves the
//! schema document produced by the engine and reads back stored forms
//! and their append-only version history.

use crate::auth::AuthSession;
use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::transport::Transport;
use chrono::{DateTime, Utc};
use formwright_ids::FormId;
use formwright_schema::SchemaDocument;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A stored form, as the backend returns it.
///
/// `version` and the timestamps are server-assigned; the document
/// itself never carries them (the projection stays pure).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormRecord {
    pub id: FormId,
    pub schema: SchemaDocument,
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry for the forms dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct FormSummary {
    pub id: FormId,
    pub title: String,
    pub version: u32,
    pub updated_at: DateTime<Utc>,
}

/// One entry of a form's append-only version history: a full schema
/// snapshot plus who changed it and when.
#[derive(Debug, Clone, Deserialize)]
pub struct FormVersion {
    pub version: u32,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
    pub schema: SchemaDocument,
}

/// Client for `/forms`.
pub struct FormsClient {
    transport: Transport,
}

impl FormsClient {
    pub fn new(config: ApiConfig, session: Arc<AuthSession>) -> ApiResult<Self> {
        Ok(Self {
            transport: Transport::new(config, session)?,
        })
    }

    /// `POST /forms` - persist a new form; the server assigns the id
    /// and version 1.
    pub async fn create(&self, schema: &SchemaDocument) -> ApiResult<FormRecord> {
        self.transport.post("/forms", schema).await
    }

    /// `PUT /forms/{id}` - replace a stored form's schema, appending a
    /// history entry. Last write wins; there is no multi-editor merge.
    pub async fn update(&self, id: FormId, schema: &SchemaDocument) -> ApiResult<FormRecord> {
        self.transport.put(&format!("/forms/{}", id), schema).await
    }

    /// `GET /forms`
    pub async fn list(&self) -> ApiResult<Vec<FormSummary>> {
        self.transport.get("/forms").await
    }

    /// `GET /forms/{id}`
    pub async fn get(&self, id: FormId) -> ApiResult<FormRecord> {
        self.transport.get(&format!("/forms/{}", id)).await
    }

    /// `DELETE /forms/{id}`
    pub async fn delete(&self, id: FormId) -> ApiResult<()> {
        self.transport.delete(&format!("/forms/{}", id)).await
    }

    /// `GET /forms/{id}/history` - newest first.
    pub async fn history(&self, id: FormId) -> ApiResult<Vec<FormVersion>> {
        self.transport.get(&format!("/forms/{}/history", id)).await
    }

    /// `GET /forms/{id}/version/{n}` - one historical snapshot.
    pub async fn version(&self, id: FormId, n: u32) -> ApiResult<FormVersion> {
        self.transport
            .get(&format!("/forms/{}/version/{}", id, n))
            .await
    }
}
