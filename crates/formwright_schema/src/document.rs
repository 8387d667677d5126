//! Schema Document - Serialized Form Schema
//!
//! The versioned JSON projection of a schema store. This is what the
//! persistence collaborator stores and the form renderer consumes.
//!
//! Projection is a pure function of the store: no timestamps, no
//! per-save identifiers. `saved_at`/`version`/`changed_by` belong to the
//! persistence layer's records, not to the document itself, which keeps
//! serialize-twice-compare trivially true.

use crate::field::{ChoiceOption, FieldInstance, FieldType, FileOptions, NumericRange};
use crate::store::{FormSettings, SchemaStore};
use formwright_ids::FieldId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current document format ordinal.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors surfaced when reading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to parse schema document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported schema version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// One field as it appears in the serialized document.
///
/// Only the properties relevant to the field's type are present; an
/// absent property means "use the type default", never an error. That
/// is a size/clarity choice, not a contract the reader may invert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: FieldId,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub label: String,

    pub name: String,

    pub required: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<NumericRange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_options: Option<FileOptions>,
}

impl FieldDescriptor {
    fn from_instance(field: &FieldInstance) -> Self {
        let t = &field.field_type;
        Self {
            id: field.id,
            field_type: t.clone(),
            label: field.label.clone(),
            name: field.name.clone(),
            required: field.required,
            placeholder: field.placeholder.clone(),
            help_text: field.help_text.clone(),
            options: t.is_choice().then(|| field.options.clone()),
            range: t.is_numeric().then(|| field.range.clone()),
            rows: matches!(t, FieldType::Textarea).then_some(field.rows),
            max_rating: matches!(t, FieldType::Rating).then_some(field.max_rating),
            file_options: matches!(t, FieldType::File).then(|| field.file_options.clone()),
        }
    }

    /// Materialize a full field instance, filling absent properties with
    /// type defaults.
    fn into_instance(self) -> FieldInstance {
        FieldInstance {
            id: self.id,
            field_type: self.field_type,
            label: self.label,
            name: self.name,
            required: self.required,
            placeholder: self.placeholder,
            help_text: self.help_text,
            options: self.options.unwrap_or_default(),
            range: self.range.unwrap_or_default(),
            rows: self.rows.unwrap_or(4),
            max_rating: self.max_rating.unwrap_or(5),
            file_options: self.file_options.unwrap_or_default(),
        }
    }
}

/// The versioned schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub schema_version: u32,

    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub submit_text: String,

    pub success_message: String,

    pub fields: Vec<FieldDescriptor>,
}

impl SchemaDocument {
    /// Project a store into a document. Pure: same store, same document.
    pub fn from_store(store: &SchemaStore) -> Self {
        let settings = store.settings();
        Self {
            schema_version: SCHEMA_VERSION,
            title: settings.title.clone(),
            description: settings.description.clone(),
            submit_text: settings.submit_text.clone(),
            success_message: settings.success_message.clone(),
            fields: store
                .fields()
                .iter()
                .map(FieldDescriptor::from_instance)
                .collect(),
        }
    }

    /// Rebuild a store from a document (loading a saved form into the
    /// builder). Unknown field types are preserved and render as
    /// placeholders.
    pub fn into_store(self) -> Result<SchemaStore, DocumentError> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(DocumentError::UnsupportedVersion {
                found: self.schema_version,
                supported: SCHEMA_VERSION,
            });
        }

        let settings = FormSettings {
            title: self.title,
            description: self.description,
            submit_text: self.submit_text,
            success_message: self.success_message,
        };
        let fields = self
            .fields
            .into_iter()
            .map(FieldDescriptor::into_instance)
            .collect();

        Ok(SchemaStore::from_parts(settings, fields))
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}
