//! Builder Session - Selection and Drag Resolution
//!
//! Wraps one [`SchemaStore`] with the two pieces of ephemeral UI state
//! the builder needs: the selected field (Idle -> Selected -> Idle, a
//! single optional reference, never a set) and the active drag gesture.
//!
//! The drag state MUST be fully cleared on every drop and cancel.
//! Ghost drop indicators and stuck drag mode all come from one bug
//! class: state surviving the gesture that created it.

use crate::field::FieldType;
use crate::store::{DropEdge, FieldPatch, OptionPatch, SchemaStore, SettingsPatch};
use formwright_ids::FieldId;
use tracing::debug;

/// What a drag gesture is doing, fixed at drag-start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragAction {
    /// Dragging a field type out of the palette.
    Add(FieldType),
    /// Dragging an existing field card.
    Reorder(FieldId),
}

/// Where the pointer currently is, classified by the UI layer.
///
/// The UI recomputes the card-midpoint split on every pointer move and
/// hands the resolver a fresh target each time; nothing here is cached
/// across moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Hovering the top or bottom half of an existing field card.
    Field { field: FieldId, edge: DropEdge },
    /// Hovering the gap between cards. `index` is the insertion position
    /// in the final list: 0 = before all fields, len = after all fields.
    Zone { index: usize },
}

/// Ephemeral state of the active drag gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    action: Option<DragAction>,
    over: Option<DropTarget>,
}

impl DragState {
    pub fn action(&self) -> Option<&DragAction> {
        self.action.as_ref()
    }

    pub fn over(&self) -> Option<&DropTarget> {
        self.over.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.action.is_some()
    }

    pub fn is_clear(&self) -> bool {
        self.action.is_none() && self.over.is_none()
    }

    fn clear(&mut self) {
        self.action = None;
        self.over = None;
    }
}

/// What a drop resolved to. Mostly useful for tests and for the UI to
/// decide whether anything needs re-rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// A new field was inserted.
    Added(FieldId),
    /// An existing field moved (possibly a degenerate no-change move).
    Reordered,
    /// Nothing happened: no active drag, self-target, or stale ids.
    Ignored,
}

/// One builder session: a schema store plus selection and drag state.
pub struct BuilderSession {
    store: SchemaStore,
    selected: Option<FieldId>,
    drag: DragState,
}

impl BuilderSession {
    pub fn new() -> Self {
        Self::from_store(SchemaStore::new())
    }

    pub fn from_store(store: SchemaStore) -> Self {
        Self {
            store,
            selected: None,
            drag: DragState::default(),
        }
    }

    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    // ========================================================================
    // Selection (Idle -> Selected -> Idle)
    // ========================================================================

    pub fn selected(&self) -> Option<FieldId> {
        self.selected
    }

    /// Select a field to edit. Selecting replaces any previous selection;
    /// selecting a stale id is a no-op.
    pub fn select(&mut self, id: FieldId) {
        if self.store.get(id).is_some() {
            self.selected = Some(id);
        } else {
            debug!("select ignored stale id: {}", id);
        }
    }

    /// Explicitly close the property panel.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    // ========================================================================
    // Store mutations routed through the session
    // ========================================================================

    /// Add a field; the new field becomes the selection.
    pub fn add_field(&mut self, field_type: &FieldType, at_index: Option<usize>) -> Option<FieldId> {
        let id = self.store.add_field(field_type, at_index);
        if let Some(id) = id {
            self.selected = Some(id);
        }
        id
    }

    pub fn update_field(&mut self, id: FieldId, patch: FieldPatch) {
        self.store.update_field(id, patch);
    }

    /// Delete a field; a matching selection clears.
    pub fn delete_field(&mut self, id: FieldId) {
        if self.store.delete_field(id) && self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Duplicate a field; the copy becomes the selection.
    pub fn duplicate_field(&mut self, id: FieldId) -> Option<FieldId> {
        let copy = self.store.duplicate_field(id);
        if let Some(copy) = copy {
            self.selected = Some(copy);
        }
        copy
    }

    pub fn add_option(&mut self, field_id: FieldId) {
        self.store.add_option(field_id);
    }

    pub fn update_option(&mut self, field_id: FieldId, index: usize, patch: OptionPatch) {
        self.store.update_option(field_id, index, patch);
    }

    pub fn delete_option(&mut self, field_id: FieldId, index: usize) {
        self.store.delete_option(field_id, index);
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.store.update_settings(patch);
    }

    /// Hand the store back, e.g. to project a document after the
    /// session ends.
    pub fn into_store(self) -> SchemaStore {
        self.store
    }

    // ========================================================================
    // Drag gesture
    // ========================================================================

    /// Begin a drag. Replaces any gesture left behind by a missed cancel.
    pub fn drag_start(&mut self, action: DragAction) {
        self.drag.clear();
        self.drag.action = Some(action);
    }

    /// Record the current drop target as the pointer moves.
    ///
    /// A reorder hover over the dragged field's own card is
    /// short-circuited here, at hover time: no indicator is shown and no
    /// target is recorded, so even a drop at that instant is a no-op.
    pub fn drag_over(&mut self, target: DropTarget) {
        if !self.drag.is_active() {
            return;
        }
        if let (Some(DragAction::Reorder(moved)), DropTarget::Field { field, .. }) =
            (&self.drag.action, &target)
        {
            if moved == field {
                self.drag.over = None;
                return;
            }
        }
        self.drag.over = Some(target);
    }

    /// Pointer left all drop targets.
    pub fn drag_leave(&mut self) {
        self.drag.over = None;
    }

    /// Gesture released outside any valid target.
    pub fn drag_cancel(&mut self) {
        self.drag.clear();
    }

    /// Release the gesture and apply it to the store.
    ///
    /// Whatever the outcome, the drag state is clear afterwards.
    pub fn drop(&mut self) -> DropOutcome {
        let action = self.drag.action.take();
        let target = self.drag.over.take();
        self.drag.clear();

        match action {
            Some(DragAction::Add(field_type)) => self.resolve_add(&field_type, target),
            Some(DragAction::Reorder(moved)) => self.resolve_reorder(moved, target),
            None => DropOutcome::Ignored,
        }
    }

    fn resolve_add(&mut self, field_type: &FieldType, target: Option<DropTarget>) -> DropOutcome {
        // Fail open: a drop with no known target appends rather than
        // silently discarding the new field.
        let index = match target {
            Some(DropTarget::Field { field, edge }) => match self.store.index_of(field) {
                Some(pos) => match edge {
                    DropEdge::Top => pos,
                    DropEdge::Bottom => pos + 1,
                },
                None => self.store.len(),
            },
            Some(DropTarget::Zone { index }) => index.min(self.store.len()),
            None => self.store.len(),
        };

        match self.add_field(field_type, Some(index)) {
            Some(id) => DropOutcome::Added(id),
            None => DropOutcome::Ignored,
        }
    }

    fn resolve_reorder(&mut self, moved: FieldId, target: Option<DropTarget>) -> DropOutcome {
        let (reference, edge) = match target {
            Some(DropTarget::Field { field, edge }) => (field, edge),
            Some(DropTarget::Zone { index }) => {
                match Self::zone_to_reference(&self.store, index) {
                    Some(resolved) => resolved,
                    // Empty canvas: nothing to reorder against.
                    None => return DropOutcome::Ignored,
                }
            }
            None => return DropOutcome::Ignored,
        };

        // Dropping onto the zone immediately adjacent to the dragged
        // field resolves to the field itself. Must not crash, drop, or
        // duplicate it.
        if reference == moved {
            return DropOutcome::Ignored;
        }

        self.store.reorder_fields(moved, reference, edge);
        DropOutcome::Reordered
    }

    /// Translate a zone index into an equivalent field-relative target.
    ///
    /// index 0 -> before the current first field; index >= len -> after
    /// the current last field; otherwise before the field occupying
    /// `index`. Returns `None` only on an empty store.
    fn zone_to_reference(store: &SchemaStore, index: usize) -> Option<(FieldId, DropEdge)> {
        let fields = store.fields();
        let len = fields.len();
        if len == 0 {
            return None;
        }
        if index == 0 {
            Some((fields[0].id, DropEdge::Top))
        } else if index >= len {
            Some((fields[len - 1].id, DropEdge::Bottom))
        } else {
            Some((fields[index].id, DropEdge::Top))
        }
    }
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new()
    }
}
