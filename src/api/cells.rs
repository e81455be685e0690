//! Cell manipulation operations
//!
//! WASM API functions for mutating the cell list of the loaded notebook:
//! insertion, deletion, duplication, reordering, collapse toggling, and
//! content edits. Every mutation bumps the notebook's `updatedAt` and
//! re-arms the debounced persistence path.

use wasm_bindgen::prelude::*;

use crate::api::helpers::to_js;
use crate::api::state;
use crate::config::SAVE_DEBOUNCE_MS;
use crate::models::{CellLanguage, CellType};
use crate::persist;
use crate::{wasm_error, wasm_info};

/// Insert a fresh cell and return it
///
/// # Parameters
/// - `cell_type`: "code" or "markdown"
/// - `language`: language tag for code cells; ignored for markdown
/// - `index`: insertion position (clamped); appends when omitted
#[wasm_bindgen(js_name = addCell)]
pub fn add_cell(
    cell_type: &str,
    language: Option<String>,
    index: Option<usize>,
) -> Result<JsValue, JsValue> {
    wasm_info!(
        "addCell called: type='{}', language={:?}, index={:?}",
        cell_type,
        language,
        index
    );

    let kind = match cell_type {
        "markdown" => CellType::Markdown,
        "code" => CellType::Code,
        other => {
            wasm_error!("Unknown cell type '{}'", other);
            return Err(JsValue::from_str(&format!("Unknown cell type: {}", other)));
        }
    };
    let language = language.as_deref().map(CellLanguage::from_tag);

    let cell = state::with_notebook_mut(|nb| nb.add_cell(kind, language, index))?;
    persist::schedule_save(SAVE_DEBOUNCE_MS);

    wasm_info!("addCell completed: id='{}'", cell.id);
    to_js(&cell, "Cell")
}

/// Delete a cell by id
#[wasm_bindgen(js_name = deleteCell)]
pub fn delete_cell(cell_id: &str) -> Result<(), JsValue> {
    wasm_info!("deleteCell called: id='{}'", cell_id);

    state::with_notebook_mut(|nb| nb.delete_cell(cell_id))?
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    persist::schedule_save(SAVE_DEBOUNCE_MS);

    wasm_info!("deleteCell completed");
    Ok(())
}

/// Duplicate a cell: identical content/language, new unique id, cleared
/// output/error/executionTime. The copy lands right after the original.
#[wasm_bindgen(js_name = duplicateCell)]
pub fn duplicate_cell(cell_id: &str) -> Result<JsValue, JsValue> {
    wasm_info!("duplicateCell called: id='{}'", cell_id);

    let copy = state::with_notebook_mut(|nb| nb.duplicate_cell(cell_id))?
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    persist::schedule_save(SAVE_DEBOUNCE_MS);

    wasm_info!("duplicateCell completed: new id='{}'", copy.id);
    to_js(&copy, "Cell")
}

/// Move the cell at `from` to position `to` (array splice)
///
/// Reordering never re-runs cells; document order is execution-independent.
#[wasm_bindgen(js_name = reorderCells)]
pub fn reorder_cells(from: usize, to: usize) -> Result<(), JsValue> {
    wasm_info!("reorderCells called: from={}, to={}", from, to);

    state::with_notebook_mut(|nb| nb.reorder(from, to))?
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    persist::schedule_save(SAVE_DEBOUNCE_MS);

    wasm_info!("reorderCells completed");
    Ok(())
}

/// Flip a cell's collapsed display flag; returns the new state
#[wasm_bindgen(js_name = toggleCollapse)]
pub fn toggle_collapse(cell_id: &str) -> Result<bool, JsValue> {
    wasm_info!("toggleCollapse called: id='{}'", cell_id);

    let collapsed = state::with_notebook_mut(|nb| nb.toggle_collapse(cell_id))?
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    persist::schedule_save(SAVE_DEBOUNCE_MS);

    wasm_info!("toggleCollapse completed: collapsed={}", collapsed);
    Ok(collapsed)
}

/// Replace a cell's source text (called on every editor change)
#[wasm_bindgen(js_name = setCellContent)]
pub fn set_cell_content(cell_id: &str, content: &str) -> Result<(), JsValue> {
    wasm_info!(
        "setCellContent called: id='{}', {} chars",
        cell_id,
        content.len()
    );

    state::with_notebook_mut(|nb| nb.set_content(cell_id, content))?
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    persist::schedule_save(SAVE_DEBOUNCE_MS);
    Ok(())
}

/// Reset every cell's output/error/executionTime
#[wasm_bindgen(js_name = clearAllOutputs)]
pub fn clear_all_outputs() -> Result<(), JsValue> {
    wasm_info!("clearAllOutputs called");

    state::with_notebook_mut(|nb| nb.clear_all_outputs())?;
    persist::schedule_save(SAVE_DEBOUNCE_MS);

    wasm_info!("clearAllOutputs completed");
    Ok(())
}
