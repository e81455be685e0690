// Tests for the notebook cell-list operations: insertion, deletion,
// duplication, reordering, and the invariants they must preserve.

use notebook_wasm::errors::ModelError;
use notebook_wasm::models::{Cell, CellLanguage, CellType, Notebook};

fn notebook_with_cells(count: usize) -> Notebook {
    let mut nb = Notebook::new("Test", Some("user-1".to_string()));
    for i in 0..count {
        let cell = nb.add_cell(CellType::Code, Some(CellLanguage::Javascript), None);
        nb.set_content(&cell.id, &format!("console.log({})", i)).unwrap();
    }
    nb
}

#[test]
fn add_cell_appends_by_default_and_clamps_index() {
    let mut nb = notebook_with_cells(2);
    let appended = nb.add_cell(CellType::Markdown, None, None);
    assert_eq!(nb.cells[2].id, appended.id);

    let clamped = nb.add_cell(CellType::Code, Some(CellLanguage::React), Some(99));
    assert_eq!(nb.cells[3].id, clamped.id);

    let front = nb.add_cell(CellType::Code, None, Some(0));
    assert_eq!(nb.cells[0].id, front.id);
    assert_eq!(front.language, Some(CellLanguage::Javascript));
}

#[test]
fn cell_ids_stay_unique_across_operations() {
    let mut nb = notebook_with_cells(3);
    nb.duplicate_cell(&nb.cells[1].id.clone()).unwrap();
    nb.duplicate_cell(&nb.cells[0].id.clone()).unwrap();
    nb.add_cell(CellType::Markdown, None, Some(2));
    assert!(nb.validate_unique_ids().is_ok());
}

#[test]
fn duplicate_copies_content_but_not_results() {
    let mut nb = notebook_with_cells(1);
    let original_id = nb.cells[0].id.clone();
    {
        let cell = nb.find_cell_mut(&original_id).unwrap();
        cell.output = Some("0".to_string());
        cell.error = Some("stale".to_string());
        cell.execution_time = Some(12.0);
    }

    let copy = nb.duplicate_cell(&original_id).unwrap();

    // New unique id, inserted right after the original
    assert_ne!(copy.id, original_id);
    assert_eq!(nb.cells[1].id, copy.id);

    // Identical content/language, cleared results
    assert_eq!(copy.content, nb.cells[0].content);
    assert_eq!(copy.language, nb.cells[0].language);
    assert!(copy.output.is_none());
    assert!(copy.error.is_none());
    assert!(copy.execution_time.is_none());

    // Original keeps its results
    assert_eq!(nb.cells[0].output.as_deref(), Some("0"));
}

#[test]
fn reorder_splices_by_index_pair() {
    let mut nb = notebook_with_cells(4);
    let ids: Vec<String> = nb.cells.iter().map(|c| c.id.clone()).collect();

    nb.reorder(0, 2).unwrap();
    let after: Vec<&str> = nb.cells.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(after, vec![&ids[1], &ids[2], &ids[0], &ids[3]]);

    // Reordering never touches run results
    assert!(nb.cells.iter().all(|c| c.output.is_none()));
}

#[test]
fn reorder_rejects_out_of_range_indices() {
    let mut nb = notebook_with_cells(2);
    assert!(matches!(
        nb.reorder(5, 0),
        Err(ModelError::IndexOutOfRange { index: 5, len: 2 })
    ));
    assert!(matches!(
        nb.reorder(0, 2),
        Err(ModelError::IndexOutOfRange { index: 2, len: 2 })
    ));
}

#[test]
fn delete_removes_exactly_one_cell() {
    let mut nb = notebook_with_cells(3);
    let target = nb.cells[1].id.clone();
    let removed = nb.delete_cell(&target).unwrap();
    assert_eq!(removed.id, target);
    assert_eq!(nb.cells.len(), 2);
    assert!(matches!(
        nb.delete_cell(&target),
        Err(ModelError::CellNotFound(_))
    ));
}

#[test]
fn toggle_collapse_flips_display_flag_only() {
    let mut nb = notebook_with_cells(1);
    let id = nb.cells[0].id.clone();
    assert!(nb.toggle_collapse(&id).unwrap());
    assert!(!nb.toggle_collapse(&id).unwrap());
    // Collapse state does not affect content or results
    assert_eq!(nb.cells[0].content, "console.log(0)");
}

#[test]
fn set_content_bumps_updated_at() {
    let mut nb = notebook_with_cells(1);
    let id = nb.cells[0].id.clone();
    nb.updated_at = Some("2000-01-01T00:00:00+00:00".to_string());
    nb.set_content(&id, "console.log(42)").unwrap();
    assert_eq!(nb.cells[0].content, "console.log(42)");
    assert_ne!(
        nb.updated_at.as_deref(),
        Some("2000-01-01T00:00:00+00:00")
    );
}

#[test]
fn clear_all_outputs_resets_every_cell() {
    let mut nb = notebook_with_cells(3);
    for cell in &mut nb.cells {
        cell.output = Some("x".to_string());
        cell.execution_time = Some(1.0);
    }
    nb.clear_all_outputs();
    assert!(nb
        .cells
        .iter()
        .all(|c| c.output.is_none() && c.error.is_none() && c.execution_time.is_none()));
}

#[test]
fn load_validation_rejects_duplicate_ids() {
    let mut nb = Notebook::new("Broken", None);
    let mut a = Cell::code(CellLanguage::Javascript, "1");
    let b = Cell::code(CellLanguage::Javascript, "2");
    a.id = b.id.clone();
    nb.cells = vec![a, b];
    assert!(matches!(
        nb.validate_unique_ids(),
        Err(ModelError::DuplicateCellId(_))
    ));
}

#[test]
fn notebook_round_trips_through_json_with_js_field_names() {
    let nb = notebook_with_cells(2);
    let json = serde_json::to_value(&nb).unwrap();
    assert_eq!(json["isPublic"], false);
    assert_eq!(json["ownerId"], "user-1");
    assert_eq!(json["cells"][0]["type"], "code");

    let back: Notebook = serde_json::from_value(json).unwrap();
    assert_eq!(back, nb);
}
