//! Notebook WASM API
//!
//! This module provides the JavaScript-facing API for the notebook core.
//! It includes shared utilities for serialization, validation, and error
//! handling, as well as the exported functions organized by functional
//! domain.
//!
//! # Module Structure
//!
//! - `helpers`: serialization, error handling, and console logging macros
//! - `state`: the WASM-owned canonical notebook (source of truth)
//! - `cells`: cell manipulation operations (add, delete, duplicate, reorder)
//! - `notebook`: notebook-level operations and persistence wiring
//! - `run`: cell execution entry points

pub mod helpers;
pub mod state;

pub mod cells;
pub mod notebook;
pub mod run;

// Re-export all public functions to present one flat API surface
pub use cells::{
    add_cell, clear_all_outputs, delete_cell, duplicate_cell, reorder_cells, set_cell_content,
    toggle_collapse,
};
pub use notebook::{
    delete_current_notebook, get_notebook, load_notebook, new_notebook, save_notebook,
    set_persistence_service,
};
pub use run::{run_all_cells, run_cell};
