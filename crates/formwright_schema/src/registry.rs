//! Field Definition Registry - Catalog and Default Shapes
//!
//! Static catalog of the field types the builder palette offers.
//! Building a new field instance always goes through the registry so
//! every sub-shape is materialized with its default up front.

use crate::field::{
    ChoiceOption, FieldInstance, FieldType, FileOptions, NumericRange,
};
use formwright_ids::FieldId;
use std::collections::HashMap;

/// Default number of visible textarea rows.
const DEFAULT_TEXTAREA_ROWS: u32 = 4;

/// Default rating scale ceiling.
const DEFAULT_MAX_RATING: u32 = 5;

/// Static catalog entry for one field type.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub field_type: FieldType,

    /// Display name shown in the builder palette.
    pub label: &'static str,

    /// Icon hint for the palette entry.
    pub icon: &'static str,

    /// Default label stamped onto new instances.
    default_label: &'static str,

    /// Default placeholder stamped onto new instances.
    default_placeholder: &'static str,
}

impl FieldDefinition {
    /// Build a new instance from this definition's default shape.
    ///
    /// `name` is assigned by the store; the definition only knows the
    /// type-level defaults. Choice types start with one option so the
    /// rendered preview is never an empty picker.
    pub fn instantiate(&self, name: impl Into<String>) -> FieldInstance {
        let options = if self.field_type.is_choice() {
            vec![ChoiceOption::numbered(1)]
        } else {
            Vec::new()
        };

        FieldInstance {
            id: FieldId::new(),
            field_type: self.field_type.clone(),
            label: self.default_label.to_string(),
            name: name.into(),
            required: false,
            placeholder: self.default_placeholder.to_string(),
            help_text: String::new(),
            options,
            range: NumericRange::default(),
            rows: DEFAULT_TEXTAREA_ROWS,
            max_rating: DEFAULT_MAX_RATING,
            file_options: FileOptions::default(),
        }
    }
}

/// Registry of available field definitions.
///
/// Read-only after construction. Unknown tags do not error: callers get
/// `None` from [`lookup`](FieldRegistry::lookup) and should fall back to
/// [`placeholder_preview`].
#[derive(Debug)]
pub struct FieldRegistry {
    definitions: HashMap<FieldType, FieldDefinition>,
    order: Vec<FieldType>,
}

impl FieldRegistry {
    /// Create a registry with every built-in field type registered.
    pub fn new() -> Self {
        let mut registry = Self {
            definitions: HashMap::new(),
            order: Vec::new(),
        };

        registry.register(FieldDefinition {
            field_type: FieldType::Text,
            label: "Text",
            icon: "type",
            default_label: "Text Field",
            default_placeholder: "Enter text",
        });
        registry.register(FieldDefinition {
            field_type: FieldType::Textarea,
            label: "Paragraph",
            icon: "align-left",
            default_label: "Paragraph Field",
            default_placeholder: "Enter long text",
        });
        registry.register(FieldDefinition {
            field_type: FieldType::Email,
            label: "Email",
            icon: "mail",
            default_label: "Email Field",
            default_placeholder: "name@example.com",
        });
        registry.register(FieldDefinition {
            field_type: FieldType::Number,
            label: "Number",
            icon: "hash",
            default_label: "Number Field",
            default_placeholder: "0",
        });
        registry.register(FieldDefinition {
            field_type: FieldType::Select,
            label: "Dropdown",
            icon: "chevron-down",
            default_label: "Dropdown Field",
            default_placeholder: "Select an option",
        });
        registry.register(FieldDefinition {
            field_type: FieldType::Radio,
            label: "Multiple Choice",
            icon: "circle-dot",
            default_label: "Multiple Choice Field",
            default_placeholder: "",
        });
        registry.register(FieldDefinition {
            field_type: FieldType::Checkbox,
            label: "Checkboxes",
            icon: "square-check",
            default_label: "Checkbox Field",
            default_placeholder: "",
        });
        registry.register(FieldDefinition {
            field_type: FieldType::Date,
            label: "Date",
            icon: "calendar",
            default_label: "Date Field",
            default_placeholder: "",
        });
        registry.register(FieldDefinition {
            field_type: FieldType::Time,
            label: "Time",
            icon: "clock",
            default_label: "Time Field",
            default_placeholder: "",
        });
        registry.register(FieldDefinition {
            field_type: FieldType::File,
            label: "File Upload",
            icon: "upload",
            default_label: "File Upload Field",
            default_placeholder: "",
        });
        registry.register(FieldDefinition {
            field_type: FieldType::Rating,
            label: "Rating",
            icon: "star",
            default_label: "Rating Field",
            default_placeholder: "",
        });
        registry.register(FieldDefinition {
            field_type: FieldType::Signature,
            label: "Signature",
            icon: "pen-line",
            default_label: "Signature Field",
            default_placeholder: "",
        });

        tracing::debug!("Registered {} field definitions", registry.definitions.len());

        registry
    }

    fn register(&mut self, definition: FieldDefinition) {
        self.order.push(definition.field_type.clone());
        self.definitions
            .insert(definition.field_type.clone(), definition);
    }

    /// Look up the definition for a type tag.
    pub fn lookup(&self, field_type: &FieldType) -> Option<&FieldDefinition> {
        self.definitions.get(field_type)
    }

    /// Check whether a type tag is registered.
    pub fn has(&self, field_type: &FieldType) -> bool {
        self.definitions.contains_key(field_type)
    }

    /// Palette entries in registration order.
    pub fn palette(&self) -> Vec<&FieldDefinition> {
        self.order
            .iter()
            .filter_map(|t| self.definitions.get(t))
            .collect()
    }

    /// Degraded preview text for a tag this registry cannot render.
    pub fn placeholder_preview(field_type: &FieldType) -> String {
        format!("Preview not available for field type: {}", field_type)
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}
