//! Schema Store - Ordered Field Collection
//!
//! The in-memory schema for one builder session: an ordered list of
//! field instances plus the form-level settings. Field order IS the
//! render/submission order.
//!
//! None of the mutating operations fail for an unknown id - they no-op.
//! Drag gestures and in-flight saves can race against deletions and end
//! up holding stale ids; treating those as hard errors would turn every
//! such race into a crash.

use crate::field::{ChoiceOption, FieldInstance, FieldType};
use crate::registry::FieldRegistry;
use formwright_ids::FieldId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which side of a reference field a moved field lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEdge {
    /// Insert immediately before the reference field.
    Top,
    /// Insert immediately after the reference field.
    Bottom,
}

/// Form-level settings edited alongside the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
    pub title: String,
    pub description: String,
    pub submit_text: String,
    pub success_message: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            title: "Untitled Form".to_string(),
            description: String::new(),
            submit_text: "Submit".to_string(),
            success_message: "Thank you! Your response has been recorded.".to_string(),
        }
    }
}

/// Single-property patch applied to one field.
///
/// One variant per mutable property keeps `update_field` exhaustive:
/// adding a property without deciding how it patches is a compile error.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPatch {
    Label(String),
    Name(String),
    Required(bool),
    Placeholder(String),
    HelpText(String),
    RangeMin(Option<f64>),
    RangeMax(Option<f64>),
    RangeStep(f64),
    Rows(u32),
    MaxRating(u32),
    FileAccept(String),
    FileMaxSizeMb(u32),
    FileMultiple(bool),
}

/// Single-property patch applied to one choice option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionPatch {
    Label(String),
    Value(String),
}

/// Single-property patch applied to the form settings.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsPatch {
    Title(String),
    Description(String),
    SubmitText(String),
    SuccessMessage(String),
}

/// Ordered collection of field instances plus form settings.
///
/// Owned by exactly one builder session. All mutations are synchronous;
/// there is no shared-mutation scenario to guard against.
#[derive(Debug)]
pub struct SchemaStore {
    settings: FormSettings,
    fields: Vec<FieldInstance>,
    registry: FieldRegistry,

    /// Monotonic suffix for auto-generated names. Never decremented, so
    /// deleting `field_3` can never make a later add collide with a
    /// surviving `field_3`.
    name_counter: usize,
}

impl SchemaStore {
    /// Create an empty store with the built-in field registry.
    pub fn new() -> Self {
        Self {
            settings: FormSettings::default(),
            fields: Vec::new(),
            registry: FieldRegistry::new(),
            name_counter: 0,
        }
    }

    /// Rebuild a store from already-materialized parts (document load).
    pub(crate) fn from_parts(settings: FormSettings, fields: Vec<FieldInstance>) -> Self {
        // Resume the counter past every surviving auto-name, not just
        // past the field count: deletions before the save can leave a
        // `field_{n}` with n greater than the number of loaded fields.
        let name_counter = fields
            .iter()
            .filter_map(|f| f.name.strip_prefix("field_")?.parse::<usize>().ok())
            .max()
            .unwrap_or(0)
            .max(fields.len());
        Self {
            settings,
            fields,
            registry: FieldRegistry::new(),
            name_counter,
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn fields(&self) -> &[FieldInstance] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn get(&self, id: FieldId) -> Option<&FieldInstance> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Current position of a field, if present.
    pub fn index_of(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    // ========================================================================
    // Field operations
    // ========================================================================

    /// Add a field of the given type, at `at_index` (clamped) or appended.
    ///
    /// Returns the new field's id, or `None` when the type is not in the
    /// registry (unknown tags are palette-only; they can arrive from a
    /// document load but never from an add gesture).
    pub fn add_field(&mut self, field_type: &FieldType, at_index: Option<usize>) -> Option<FieldId> {
        let Some(definition) = self.registry.lookup(field_type) else {
            debug!("add_field ignored unregistered type: {}", field_type);
            return None;
        };

        self.name_counter += 1;
        let field = definition.instantiate(format!("field_{}", self.name_counter));
        let id = field.id;

        let index = at_index.unwrap_or(self.fields.len()).min(self.fields.len());
        self.fields.insert(index, field);

        debug!("Added {} field at index {}", field_type, index);
        Some(id)
    }

    /// Apply a single-property patch. Unknown id is a silent no-op.
    pub fn update_field(&mut self, id: FieldId, patch: FieldPatch) {
        let Some(field) = self.fields.iter_mut().find(|f| f.id == id) else {
            debug!("update_field ignored stale id: {}", id);
            return;
        };

        match patch {
            FieldPatch::Label(v) => field.label = v,
            FieldPatch::Name(v) => field.name = v,
            FieldPatch::Required(v) => field.required = v,
            FieldPatch::Placeholder(v) => field.placeholder = v,
            FieldPatch::HelpText(v) => field.help_text = v,
            FieldPatch::RangeMin(v) => field.range.min = v,
            FieldPatch::RangeMax(v) => field.range.max = v,
            FieldPatch::RangeStep(v) => field.range.step = v,
            FieldPatch::Rows(v) => field.rows = v,
            FieldPatch::MaxRating(v) => field.max_rating = v,
            FieldPatch::FileAccept(v) => field.file_options.accept = v,
            FieldPatch::FileMaxSizeMb(v) => field.file_options.max_size_mb = v,
            FieldPatch::FileMultiple(v) => field.file_options.multiple = v,
        }
    }

    /// Remove a field. Unknown id is a silent no-op.
    ///
    /// Returns whether anything was removed so the session can clear a
    /// matching selection.
    pub fn delete_field(&mut self, id: FieldId) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!("delete_field ignored stale id: {}", id);
            return false;
        };
        self.fields.remove(index);
        true
    }

    /// Insert an exact copy immediately after the source field, with a
    /// fresh id and derived name/label. Returns the copy's id.
    pub fn duplicate_field(&mut self, id: FieldId) -> Option<FieldId> {
        let index = self.index_of(id)?;
        let copy = self.fields[index].duplicated();
        let copy_id = copy.id;
        self.fields.insert(index + 1, copy);
        Some(copy_id)
    }

    /// Move `moved` so it sits immediately before (`Top`) or after
    /// (`Bottom`) `reference`.
    ///
    /// Self-target and unknown ids are no-ops. Degenerate moves onto an
    /// adjacent neighbor produce no visible change but never drop or
    /// duplicate the field.
    pub fn reorder_fields(&mut self, moved: FieldId, reference: FieldId, edge: DropEdge) {
        if moved == reference {
            return;
        }
        let Some(from) = self.index_of(moved) else {
            debug!("reorder_fields ignored stale moved id: {}", moved);
            return;
        };
        let Some(ref_before) = self.index_of(reference) else {
            debug!("reorder_fields ignored stale reference id: {}", reference);
            return;
        };

        let field = self.fields.remove(from);

        // Removing the moved field shifts the reference left when it sat
        // after the moved one.
        let ref_index = if from < ref_before {
            ref_before - 1
        } else {
            ref_before
        };
        let insert_at = match edge {
            DropEdge::Top => ref_index,
            DropEdge::Bottom => ref_index + 1,
        };
        self.fields.insert(insert_at, field);
    }

    // ========================================================================
    // Option sub-editor
    // ========================================================================

    /// Append an auto-numbered option to a choice field.
    ///
    /// No-op for unknown ids and for non-choice fields.
    pub fn add_option(&mut self, field_id: FieldId) {
        let Some(field) = self.choice_field_mut(field_id) else {
            return;
        };
        let option = ChoiceOption::numbered(field.options.len() + 1);
        field.options.push(option);
    }

    /// Patch one option of a choice field. Out-of-range index is a no-op.
    pub fn update_option(&mut self, field_id: FieldId, index: usize, patch: OptionPatch) {
        let Some(field) = self.choice_field_mut(field_id) else {
            return;
        };
        let Some(option) = field.options.get_mut(index) else {
            debug!("update_option ignored out-of-range index {}", index);
            return;
        };
        match patch {
            OptionPatch::Label(v) => option.label = v,
            OptionPatch::Value(v) => option.value = v,
        }
    }

    /// Remove one option of a choice field. Out-of-range index is a no-op.
    pub fn delete_option(&mut self, field_id: FieldId, index: usize) {
        let Some(field) = self.choice_field_mut(field_id) else {
            return;
        };
        if index < field.options.len() {
            field.options.remove(index);
        }
    }

    fn choice_field_mut(&mut self, field_id: FieldId) -> Option<&mut FieldInstance> {
        let field = self.fields.iter_mut().find(|f| f.id == field_id)?;
        if !field.field_type.is_choice() {
            debug!(
                "option edit ignored on non-choice field {} ({})",
                field_id, field.field_type
            );
            return None;
        }
        Some(field)
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        match patch {
            SettingsPatch::Title(v) => self.settings.title = v,
            SettingsPatch::Description(v) => self.settings.description = v,
            SettingsPatch::SubmitText(v) => self.settings.submit_text = v,
            SettingsPatch::SuccessMessage(v) => self.settings.success_message = v,
        }
    }
}

impl Default for SchemaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(types: &[FieldType]) -> (SchemaStore, Vec<FieldId>) {
        let mut store = SchemaStore::new();
        let ids = types
            .iter()
            .map(|t| store.add_field(t, None).unwrap())
            .collect();
        (store, ids)
    }

    fn order(store: &SchemaStore) -> Vec<FieldId> {
        store.fields().iter().map(|f| f.id).collect()
    }

    #[test]
    fn test_add_appends_and_autonames() {
        let (store, ids) = store_with(&[FieldType::Text, FieldType::Email]);
        assert_eq!(store.len(), 2);
        assert_eq!(order(&store), ids);
        assert_eq!(store.fields()[0].name, "field_1");
        assert_eq!(store.fields()[1].name, "field_2");
    }

    #[test]
    fn test_add_at_index_zero_and_end() {
        let (mut store, ids) = store_with(&[FieldType::Text, FieldType::Text]);

        let first = store.add_field(&FieldType::Email, Some(0)).unwrap();
        assert_eq!(order(&store), vec![first, ids[0], ids[1]]);

        let last = store.add_field(&FieldType::Email, Some(3)).unwrap();
        assert_eq!(order(&store), vec![first, ids[0], ids[1], last]);
    }

    #[test]
    fn test_add_index_clamped_to_len() {
        let (mut store, ids) = store_with(&[FieldType::Text]);
        let id = store.add_field(&FieldType::Text, Some(99)).unwrap();
        assert_eq!(order(&store), vec![ids[0], id]);
    }

    #[test]
    fn test_add_unknown_type_is_noop() {
        let mut store = SchemaStore::new();
        let alien = FieldType::Unknown("hologram".to_string());
        assert!(store.add_field(&alien, None).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_autoname_never_reuses_after_delete() {
        let (mut store, ids) = store_with(&[FieldType::Text, FieldType::Text]);
        store.delete_field(ids[1]);

        let id = store.add_field(&FieldType::Text, None).unwrap();
        assert_eq!(store.get(id).unwrap().name, "field_3");
    }

    #[test]
    fn test_update_field_patches_one_property() {
        let (mut store, ids) = store_with(&[FieldType::Text, FieldType::Text]);
        let before_sibling = store.fields()[1].clone();

        store.update_field(ids[0], FieldPatch::Required(true));

        let target = store.get(ids[0]).unwrap();
        assert!(target.required);
        assert_eq!(target.name, "field_1");
        assert_eq!(target.label, "Text Field");
        assert_eq!(store.fields()[1], before_sibling);
    }

    #[test]
    fn test_update_field_stale_id_is_noop() {
        let (mut store, _) = store_with(&[FieldType::Text]);
        let before = store.fields().to_vec();
        store.update_field(FieldId::new(), FieldPatch::Label("x".into()));
        assert_eq!(store.fields(), &before[..]);
    }

    #[test]
    fn test_delete_field() {
        let (mut store, ids) = store_with(&[FieldType::Text, FieldType::Email]);
        assert!(store.delete_field(ids[0]));
        assert_eq!(order(&store), vec![ids[1]]);
        assert!(!store.delete_field(ids[0]));
    }

    #[test]
    fn test_duplicate_field() {
        let (mut store, ids) = store_with(&[FieldType::Select, FieldType::Text]);
        store.update_field(ids[0], FieldPatch::Required(true));

        let copy_id = store.duplicate_field(ids[0]).unwrap();
        assert_ne!(copy_id, ids[0]);
        assert_eq!(order(&store), vec![ids[0], copy_id, ids[1]]);

        let source = store.get(ids[0]).unwrap().clone();
        let copy = store.get(copy_id).unwrap();
        assert_eq!(copy.name, format!("{}_copy", source.name));
        assert_eq!(copy.label, format!("{} (Copy)", source.label));
        assert_eq!(copy.required, source.required);
        assert_eq!(copy.options, source.options);
        assert_eq!(copy.field_type, source.field_type);
    }

    #[test]
    fn test_reorder_bottom_of_last() {
        // [A,B,C], move A below C -> [B,C,A]
        let (mut store, ids) = store_with(&[FieldType::Text, FieldType::Text, FieldType::Text]);
        store.reorder_fields(ids[0], ids[2], DropEdge::Bottom);
        assert_eq!(order(&store), vec![ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn test_reorder_top_of_first() {
        // [A,B,C], move C above A -> [C,A,B]
        let (mut store, ids) = store_with(&[FieldType::Text, FieldType::Text, FieldType::Text]);
        store.reorder_fields(ids[2], ids[0], DropEdge::Top);
        assert_eq!(order(&store), vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn test_reorder_self_target_is_noop() {
        let (mut store, ids) = store_with(&[FieldType::Text, FieldType::Text, FieldType::Text]);
        let before = order(&store);
        store.reorder_fields(ids[1], ids[1], DropEdge::Top);
        assert_eq!(order(&store), before);
        store.reorder_fields(ids[1], ids[1], DropEdge::Bottom);
        assert_eq!(order(&store), before);
    }

    #[test]
    fn test_reorder_adjacent_degenerate_moves() {
        // Moving A to "top of B" when A already precedes B: no change,
        // nothing dropped, nothing duplicated.
        let (mut store, ids) = store_with(&[FieldType::Text, FieldType::Text, FieldType::Text]);
        store.reorder_fields(ids[0], ids[1], DropEdge::Top);
        assert_eq!(order(&store), ids);

        store.reorder_fields(ids[1], ids[0], DropEdge::Bottom);
        assert_eq!(order(&store), ids);
    }

    #[test]
    fn test_reorder_stale_ids_are_noops() {
        let (mut store, ids) = store_with(&[FieldType::Text, FieldType::Text]);
        store.reorder_fields(FieldId::new(), ids[0], DropEdge::Top);
        store.reorder_fields(ids[0], FieldId::new(), DropEdge::Bottom);
        assert_eq!(order(&store), ids);
    }

    #[test]
    fn test_order_invariant_no_dup_no_missing() {
        let (mut store, ids) = store_with(&[
            FieldType::Text,
            FieldType::Email,
            FieldType::Select,
            FieldType::Date,
        ]);
        store.reorder_fields(ids[3], ids[0], DropEdge::Top);
        store.reorder_fields(ids[1], ids[2], DropEdge::Bottom);
        store.delete_field(ids[0]);
        store.add_field(&FieldType::Number, Some(1));

        let current = order(&store);
        let mut unique = current.clone();
        unique.sort_by_key(|id| id.to_string());
        unique.dedup();
        assert_eq!(current.len(), unique.len(), "duplicate id after mutation");
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_option_editing() {
        let (mut store, ids) = store_with(&[FieldType::Radio]);
        let id = ids[0];

        store.add_option(id);
        let field = store.get(id).unwrap();
        assert_eq!(field.options.len(), 2);
        assert_eq!(field.options[1].value, "option2");

        store.update_option(id, 1, OptionPatch::Label("Maybe".into()));
        assert_eq!(store.get(id).unwrap().options[1].label, "Maybe");

        store.delete_option(id, 0);
        let field = store.get(id).unwrap();
        assert_eq!(field.options.len(), 1);
        assert_eq!(field.options[0].label, "Maybe");
    }

    #[test]
    fn test_option_editing_guards() {
        let (mut store, ids) = store_with(&[FieldType::Text, FieldType::Select]);

        // Non-choice field: all option edits no-op.
        store.add_option(ids[0]);
        assert!(store.get(ids[0]).unwrap().options.is_empty());

        // Out-of-range index: no-op.
        store.update_option(ids[1], 7, OptionPatch::Value("x".into()));
        store.delete_option(ids[1], 7);
        assert_eq!(store.get(ids[1]).unwrap().options.len(), 1);
    }

    #[test]
    fn test_update_settings() {
        let mut store = SchemaStore::new();
        store.update_settings(SettingsPatch::Title("Enrollment".into()));
        store.update_settings(SettingsPatch::SubmitText("Send".into()));
        assert_eq!(store.settings().title, "Enrollment");
        assert_eq!(store.settings().submit_text, "Send");
        assert_eq!(store.settings().description, "");
    }
}
