//! Notebook-level operations and persistence wiring

use wasm_bindgen::prelude::*;

use crate::api::helpers::{from_js, to_js};
use crate::api::state;
use crate::models::Notebook;
use crate::persist;
use crate::{wasm_error, wasm_info};

/// Create a fresh, not-yet-persisted notebook and make it current.
/// The document-store id is assigned by the first save.
#[wasm_bindgen(js_name = newNotebook)]
pub fn new_notebook(title: &str, owner_id: Option<String>) -> Result<JsValue, JsValue> {
    wasm_info!("newNotebook called: title='{}'", title);

    let notebook = Notebook::new(title, owner_id);
    let result = to_js(&notebook, "Notebook")?;
    state::set_notebook(notebook);

    wasm_info!("newNotebook completed");
    Ok(result)
}

/// Load a notebook document (as fetched from the store) into WASM-owned
/// state. Rejects documents with duplicate cell ids.
#[wasm_bindgen(js_name = loadNotebook)]
pub fn load_notebook(notebook_js: JsValue) -> Result<(), JsValue> {
    wasm_info!("loadNotebook called");

    let notebook: Notebook = from_js(notebook_js, "Notebook")?;
    if let Err(err) = notebook.validate_unique_ids() {
        wasm_error!("Rejected notebook: {}", err);
        return Err(JsValue::from_str(&err.to_string()));
    }

    wasm_info!(
        "loadNotebook completed: '{}', {} cells",
        notebook.title,
        notebook.cells.len()
    );
    state::set_notebook(notebook);
    Ok(())
}

/// Current notebook state, serialized for the JS shell
#[wasm_bindgen(js_name = getNotebook)]
pub fn get_notebook() -> Result<JsValue, JsValue> {
    state::with_notebook(|nb| to_js(nb, "Notebook"))?
}

/// Install the persistence service object the shell provides
/// (createNotebook / getNotebook / updateNotebook / deleteNotebook /
/// getAllNotebooks).
#[wasm_bindgen(js_name = setPersistenceService)]
pub fn set_persistence_service(service: js_sys::Object) {
    wasm_info!("setPersistenceService called");
    persist::set_service(service);
}

/// Save immediately, flushing any pending debounced save
#[wasm_bindgen(js_name = saveNotebook)]
pub fn save_notebook() -> Result<(), JsValue> {
    wasm_info!("saveNotebook called");
    if !persist::has_service() {
        return Err(JsValue::from_str("no persistence service installed"));
    }
    persist::flush_now();
    Ok(())
}

/// Drop the current notebook from WASM state and ask the store to delete
/// it. Owner-initiated and explicit; there is no soft delete.
#[wasm_bindgen(js_name = deleteCurrentNotebook)]
pub fn delete_current_notebook() -> Result<(), JsValue> {
    wasm_info!("deleteCurrentNotebook called");

    persist::cancel_pending();
    let id = state::with_notebook(|nb| nb.id.clone())?;
    state::clear();
    if let Some(id) = id {
        persist::delete_notebook(&id);
    }

    wasm_info!("deleteCurrentNotebook completed");
    Ok(())
}
