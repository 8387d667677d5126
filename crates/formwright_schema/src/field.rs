//! Field Types
//!
//! A form schema is an ordered list of field instances. Each instance is
//! built from a static definition in the registry and carries every
//! optional sub-shape fully materialized, so readers never have to
//! invent defaults at the call site.

use formwright_ids::FieldId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying what kind of input a field renders as.
///
/// Unrecognized tags from stored documents round-trip through
/// [`FieldType::Unknown`] instead of failing deserialization, so a
/// future-versioned schema degrades to a placeholder preview rather
/// than taking down the whole builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Number,
    Select,
    Radio,
    Checkbox,
    Date,
    Time,
    File,
    Rating,
    Signature,
    /// Tag this build does not recognize. Preserved verbatim for
    /// round-tripping.
    #[serde(untagged)]
    Unknown(String),
}

impl FieldType {
    /// All tags this build knows how to render.
    pub const KNOWN: [FieldType; 12] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Email,
        FieldType::Number,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Date,
        FieldType::Time,
        FieldType::File,
        FieldType::Rating,
        FieldType::Signature,
    ];

    /// Canonical wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::File => "file",
            FieldType::Rating => "rating",
            FieldType::Signature => "signature",
            FieldType::Unknown(tag) => tag,
        }
    }

    /// Choice types own an options list and render as pick-one/pick-many.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Radio | FieldType::Checkbox
        )
    }

    /// Numeric types carry min/max/step range settings.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Number)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FieldType::Unknown(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a choice field's options list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Text shown to the person filling in the form.
    pub label: String,

    /// Value recorded in the submission payload.
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// The auto-suggested option for position `n` (1-based):
    /// value `option{n}`, label `Option {n}`.
    pub fn numbered(n: usize) -> Self {
        Self {
            label: format!("Option {}", n),
            value: format!("option{}", n),
        }
    }
}

/// Range settings for numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: f64,
}

impl Default for NumericRange {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            step: 1.0,
        }
    }
}

/// Upload settings for file fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOptions {
    /// Accepted MIME types / extensions, comma separated. Empty = any.
    pub accept: String,

    /// Maximum upload size in megabytes.
    pub max_size_mb: u32,

    /// Whether more than one file may be attached.
    pub multiple: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            accept: String::new(),
            max_size_mb: 10,
            multiple: false,
        }
    }
}

/// A configured field within a form schema.
///
/// Every sub-shape is materialized at creation time with its type
/// default. The schema document projection decides which of them are
/// relevant enough to serialize for a given type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInstance {
    /// Unique within one schema store, stable for the instance's lifetime.
    pub id: FieldId,

    pub field_type: FieldType,

    /// Display label shown above the input.
    pub label: String,

    /// Machine identifier used as the submission-data key.
    ///
    /// Uniqueness across fields is NOT enforced; duplicate names mean
    /// last-value-wins in the flat answer map. See the store docs.
    pub name: String,

    pub required: bool,

    pub placeholder: String,

    pub help_text: String,

    /// Choice list; meaningful only for choice types.
    pub options: Vec<ChoiceOption>,

    /// Range settings; meaningful only for numeric types.
    pub range: NumericRange,

    /// Visible rows; meaningful only for textarea.
    pub rows: u32,

    /// Highest selectable rating; meaningful only for rating.
    pub max_rating: u32,

    /// Upload settings; meaningful only for file fields.
    pub file_options: FileOptions,
}

impl FieldInstance {
    /// Clone this field as a duplicate: fresh id, derived name/label.
    pub fn duplicated(&self) -> Self {
        let mut copy = self.clone();
        copy.id = FieldId::new();
        copy.name = format!("{}_copy", self.name);
        copy.label = format!("{} (Copy)", self.label);
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_wire_tags() {
        let json = serde_json::to_string(&FieldType::Textarea).unwrap();
        assert_eq!(json, "\"textarea\"");

        let parsed: FieldType = serde_json::from_str("\"select\"").unwrap();
        assert_eq!(parsed, FieldType::Select);
    }

    #[test]
    fn test_unknown_tag_round_trips() {
        let parsed: FieldType = serde_json::from_str("\"hologram\"").unwrap();
        assert_eq!(parsed, FieldType::Unknown("hologram".to_string()));
        assert!(!parsed.is_known());

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, "\"hologram\"");
    }

    #[test]
    fn test_choice_classification() {
        assert!(FieldType::Select.is_choice());
        assert!(FieldType::Radio.is_choice());
        assert!(FieldType::Checkbox.is_choice());
        assert!(!FieldType::Text.is_choice());
        assert!(!FieldType::Unknown("select2".into()).is_choice());
    }

    #[test]
    fn test_numbered_option() {
        let opt = ChoiceOption::numbered(3);
        assert_eq!(opt.value, "option3");
        assert_eq!(opt.label, "Option 3");
    }
}
