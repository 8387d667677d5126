//! Form Schema Engine
//!
//! # Lifecycle of a form schema
//!
//! 1. **Palette**: the field registry enumerates the available types
//! 2. **Build**: a builder session mutates its schema store through
//!    discrete gestures (add, edit, duplicate, delete, drag-reorder)
//! 3. **Project**: the store serializes to a versioned schema document
//! 4. **Persist/Render**: external collaborators store the document and
//!    render it as an interactive form
//!
//! The store is owned by exactly one session and mutated synchronously;
//! there is no collaborative-editing concern here. Operations tolerate
//! stale ids by no-opping - drag gestures and async saves can race with
//! deletions, and those races must never crash the builder.
//!
//! # Modules
//!
//! - [`field`]: field type tags, instances, and materialized sub-shapes
//! - [`registry`]: static catalog of field definitions and default shapes
//! - [`store`]: the ordered field collection and its operations
//! - [`session`]: selection state machine and drag-reorder resolution
//! - [`document`]: the versioned JSON schema document

pub mod document;
pub mod field;
pub mod registry;
pub mod session;
pub mod store;

pub use document::{DocumentError, FieldDescriptor, SchemaDocument, SCHEMA_VERSION};
pub use field::{ChoiceOption, FieldInstance, FieldType, FileOptions, NumericRange};
pub use registry::{FieldDefinition, FieldRegistry};
pub use session::{BuilderSession, DragAction, DragState, DropOutcome, DropTarget};
pub use store::{
    DropEdge, FieldPatch, FormSettings, OptionPatch, SchemaStore, SettingsPatch,
};

// Re-export the id types callers need alongside the engine.
pub use formwright_ids::{FieldId, FormId};
