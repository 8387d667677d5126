//! Shared identifier wrappers for Formwright.
//!
//! Every entity that crosses a crate boundary gets its own newtype so a
//! `FieldId` can never be passed where a `FormId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Error returned when parsing a UUID-backed identifier fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError {
    message: String,
}

impl IdParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for IdParseError {}

macro_rules! define_uuid_id {
    ($name:ident, $label:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn parse(value: &str) -> Result<Self, IdParseError> {
                let uuid = Uuid::parse_str(value)
                    .map_err(|e| IdParseError::new(format!("Invalid {}: {}", $label, e)))?;
                Ok(Self(uuid))
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_uuid_id!(FieldId, "field ID");
define_uuid_id!(FormId, "form ID");
define_uuid_id!(MenuItemId, "menu item ID");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = FieldId::new();
        let b = FieldId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_round_trip() {
        let id = FormId::new();
        let parsed = FormId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = FieldId::parse("not-a-uuid").unwrap_err();
        assert!(err.to_string().contains("field ID"));
    }

    #[test]
    fn test_serde_transparent() {
        let id = MenuItemId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
