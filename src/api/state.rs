//! WASM-owned notebook state (canonical source of truth)
//!
//! JavaScript never mutates notebook content directly; every change goes
//! through an exported function that locks this store. The mutex is
//! uncontended (the module is single-threaded) but keeps the ownership
//! story explicit.

use lazy_static::lazy_static;
use std::sync::Mutex;
use wasm_bindgen::JsValue;

use crate::models::Notebook;

lazy_static! {
    static ref NOTEBOOK: Mutex<Option<Notebook>> = Mutex::new(None);
}

pub fn set_notebook(notebook: Notebook) {
    *NOTEBOOK.lock().unwrap() = Some(notebook);
}

pub fn clear() {
    *NOTEBOOK.lock().unwrap() = None;
}

/// Clone of the current notebook, for save payloads
pub fn snapshot() -> Option<Notebook> {
    NOTEBOOK.lock().unwrap().clone()
}

/// Read access to the loaded notebook
pub fn with_notebook<R>(f: impl FnOnce(&Notebook) -> R) -> Result<R, JsValue> {
    let guard = NOTEBOOK.lock().unwrap();
    let notebook = guard
        .as_ref()
        .ok_or_else(|| JsValue::from_str("No notebook loaded"))?;
    Ok(f(notebook))
}

/// Write access to the loaded notebook
pub fn with_notebook_mut<R>(f: impl FnOnce(&mut Notebook) -> R) -> Result<R, JsValue> {
    let mut guard = NOTEBOOK.lock().unwrap();
    let notebook = guard
        .as_mut()
        .ok_or_else(|| JsValue::from_str("No notebook loaded"))?;
    Ok(f(notebook))
}
