//! End-to-end builder flows: palette -> canvas -> reorder -> document.

use formwright_schema::{
    BuilderSession, DragAction, DropEdge, DropOutcome, DropTarget, FieldPatch, FieldType,
    OptionPatch, SchemaDocument, SettingsPatch, SCHEMA_VERSION,
};

fn field_order(session: &BuilderSession) -> Vec<formwright_schema::FieldId> {
    session.store().fields().iter().map(|f| f.id).collect()
}

#[test]
fn test_build_a_form_from_scratch() {
    let mut session = BuilderSession::new();

    // Drag "text" from the palette onto the empty canvas.
    session.drag_start(DragAction::Add(FieldType::Text));
    session.drag_over(DropTarget::Zone { index: 0 });
    let DropOutcome::Added(name_field) = session.drop() else {
        panic!("palette drop should add a field");
    };
    assert!(session.drag().is_clear());
    assert_eq!(session.selected(), Some(name_field));

    // Add an email field below it, then a dropdown above it.
    session.drag_start(DragAction::Add(FieldType::Email));
    session.drag_over(DropTarget::Field {
        field: name_field,
        edge: DropEdge::Bottom,
    });
    let DropOutcome::Added(email_field) = session.drop() else {
        panic!("expected add");
    };

    session.drag_start(DragAction::Add(FieldType::Select));
    session.drag_over(DropTarget::Field {
        field: name_field,
        edge: DropEdge::Top,
    });
    let DropOutcome::Added(course_field) = session.drop() else {
        panic!("expected add");
    };

    assert_eq!(
        field_order(&session),
        vec![course_field, name_field, email_field]
    );

    // Configure the dropdown from the property panel.
    session.update_field(course_field, FieldPatch::Label("Course".into()));
    session.update_field(course_field, FieldPatch::Required(true));

    // Drag the dropdown to the end of the form.
    session.drag_start(DragAction::Reorder(course_field));
    session.drag_over(DropTarget::Zone { index: 3 });
    assert_eq!(session.drop(), DropOutcome::Reordered);
    assert_eq!(session.store().len(), 3);
    assert_eq!(
        field_order(&session),
        vec![name_field, email_field, course_field]
    );

    // Duplicate, then delete the duplicate.
    let copy = session.duplicate_field(course_field).unwrap();
    assert_eq!(session.store().len(), 4);
    assert_eq!(session.selected(), Some(copy));
    session.delete_field(copy);
    assert_eq!(session.store().len(), 3);
    assert_eq!(session.selected(), None);

    // Project and inspect the document.
    let doc = SchemaDocument::from_store(session.store());
    assert_eq!(doc.schema_version, SCHEMA_VERSION);
    assert_eq!(doc.fields.len(), 3);
    let course = doc
        .fields
        .iter()
        .find(|f| f.id == course_field)
        .expect("course field serialized");
    assert!(course.required);
    assert_eq!(course.label, "Course");
    assert!(course.options.is_some());
}

#[test]
fn test_edit_save_reload_cycle() {
    let mut session = BuilderSession::new();
    session.add_field(&FieldType::Select, None);
    let radio = session.add_field(&FieldType::Radio, None).unwrap();
    session.add_option(radio);
    session.update_field(radio, FieldPatch::Name("campus".into()));

    let json = SchemaDocument::from_store(session.store()).to_json().unwrap();

    // Reload into a fresh session, as the builder does when opening a
    // saved form.
    let reloaded = SchemaDocument::from_json(&json)
        .unwrap()
        .into_store()
        .unwrap();
    let mut session = BuilderSession::from_store(reloaded);

    let campus = session
        .store()
        .fields()
        .iter()
        .find(|f| f.name == "campus")
        .expect("loaded field by name")
        .id;
    assert_eq!(session.store().get(campus).unwrap().options.len(), 2);

    // Auto-names after a reload never collide with loaded fields.
    let new_field = session.add_field(&FieldType::Text, None).unwrap();
    let new_name = session.store().get(new_field).unwrap().name.clone();
    let occurrences = session
        .store()
        .fields()
        .iter()
        .filter(|f| f.name == new_name)
        .count();
    assert_eq!(occurrences, 1);
}

#[test]
fn test_reload_after_deletions_keeps_autonames_unique() {
    // Deletions before the save leave gaps: survivors keep suffixes
    // higher than the field count. Adding after the reload must resume
    // past the highest survivor, not past the count.
    let mut session = BuilderSession::new();
    let ids: Vec<_> = (0..5)
        .map(|_| session.add_field(&FieldType::Text, None).unwrap())
        .collect();
    for id in &ids[1..4] {
        session.delete_field(*id);
    }
    let names: Vec<_> = session
        .store()
        .fields()
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, vec!["field_1", "field_5"]);

    let json = SchemaDocument::from_store(session.store()).to_json().unwrap();
    let reloaded = SchemaDocument::from_json(&json)
        .unwrap()
        .into_store()
        .unwrap();
    let mut session = BuilderSession::from_store(reloaded);

    for _ in 0..3 {
        session.add_field(&FieldType::Text, None);
    }

    let mut names: Vec<_> = session
        .store()
        .fields()
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names.len(), 5);
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 5, "auto-name collided after reload");
}

#[test]
fn test_scenario_select_on_empty_store() {
    let mut session = BuilderSession::new();
    let id = session.add_field(&FieldType::Select, None).unwrap();

    let store = session.store();
    assert_eq!(store.len(), 1);
    let field = store.get(id).unwrap();
    assert_eq!(field.field_type, FieldType::Select);
    assert_eq!(field.options.len(), 1);
    assert_eq!(field.options[0].value, "option1");
    assert_eq!(field.options[0].label, "Option 1");
}

#[test]
fn test_settings_flow_into_document() {
    let mut session = BuilderSession::new();
    session.update_settings(SettingsPatch::Title("Housing Application".into()));
    session.update_settings(SettingsPatch::Description("Fall term".into()));
    session.update_settings(SettingsPatch::SuccessMessage("Received.".into()));

    let doc = SchemaDocument::from_store(session.store());
    assert_eq!(doc.title, "Housing Application");
    assert_eq!(doc.description, "Fall term");
    assert_eq!(doc.success_message, "Received.");
}

#[test]
fn test_option_edits_survive_projection() {
    let mut session = BuilderSession::new();
    let id = session.add_field(&FieldType::Checkbox, None).unwrap();
    session.add_option(id);
    session.update_option(id, 0, OptionPatch::Label("On campus".into()));
    session.update_option(id, 1, OptionPatch::Value("off_campus".into()));

    let doc = SchemaDocument::from_store(session.store());
    let options = doc.fields[0].options.as_ref().unwrap();
    assert_eq!(options[0].label, "On campus");
    assert_eq!(options[1].value, "off_campus");
}
