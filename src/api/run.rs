//! Cell execution entry points
//!
//! `runCell` drives the engine for one cell and writes the outcome back
//! into the notebook. Runs are fenced per cell with a monotonically
//! increasing token: when the same cell is re-run while a run is still in
//! flight, the superseded run's settle is discarded and the latest run
//! wins.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Mutex;
use wasm_bindgen::prelude::*;

use crate::api::helpers::to_js;
use crate::api::state;
use crate::config::SAVE_DEBOUNCE_MS;
use crate::persist;
use crate::runner::engine;
use crate::{wasm_info, wasm_warn};

lazy_static! {
    /// Latest run token per cell id
    static ref RUN_TOKENS: Mutex<HashMap<String, u64>> = Mutex::new(HashMap::new());
}

fn begin_run(cell_id: &str) -> u64 {
    let mut tokens = RUN_TOKENS.lock().unwrap();
    let token = tokens.entry(cell_id.to_string()).or_insert(0);
    *token += 1;
    *token
}

fn is_current(cell_id: &str, token: u64) -> bool {
    RUN_TOKENS.lock().unwrap().get(cell_id).copied() == Some(token)
}

/// Run one cell and return its updated record.
///
/// Always settles: the returned cell carries either a console-style
/// transcript or an error message, plus the elapsed time. Exceptions in
/// cell code never propagate to the caller.
#[wasm_bindgen(js_name = runCell)]
pub async fn run_cell(cell_id: String) -> Result<JsValue, JsValue> {
    wasm_info!("runCell called: id='{}'", cell_id);

    // Clear prior results and snapshot what to run
    let (cell_type, language, content) = state::with_notebook_mut(|nb| {
        nb.find_cell_mut(&cell_id).map(|cell| {
            cell.clear_results();
            (
                cell.cell_type,
                cell.effective_language(),
                cell.content.clone(),
            )
        })
    })?
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let token = begin_run(&cell_id);
    let outcome = engine::run(&cell_id, cell_type, language, &content).await;

    if is_current(&cell_id, token) {
        state::with_notebook_mut(|nb| {
            // The cell may have been deleted while the run was in flight;
            // nothing to settle into then.
            if let Ok(cell) = nb.find_cell_mut(&cell_id) {
                cell.output = Some(outcome.output.clone());
                cell.error = outcome.error.clone();
                cell.execution_time = Some(outcome.execution_time);
            }
            nb.touch();
        })?;
        persist::schedule_save(SAVE_DEBOUNCE_MS);
        wasm_info!(
            "runCell settled: id='{}', error={}, {:.1}ms",
            cell_id,
            outcome.error.is_some(),
            outcome.execution_time
        );
    } else {
        wasm_warn!("runCell superseded for cell '{}', result discarded", cell_id);
    }

    match state::with_notebook(|nb| nb.find_cell(&cell_id).cloned())? {
        Ok(cell) => to_js(&cell, "Cell"),
        Err(_) => Ok(JsValue::NULL),
    }
}

/// Run every cell sequentially in document order; returns the updated
/// cell records as an array.
#[wasm_bindgen(js_name = runAllCells)]
pub async fn run_all_cells() -> Result<JsValue, JsValue> {
    wasm_info!("runAllCells called");

    let ids = state::with_notebook(|nb| {
        nb.cells.iter().map(|c| c.id.clone()).collect::<Vec<_>>()
    })?;

    let results = js_sys::Array::new();
    for id in ids {
        let settled = run_cell(id).await?;
        results.push(&settled);
    }

    wasm_info!("runAllCells completed: {} cells", results.length());
    Ok(results.into())
}
