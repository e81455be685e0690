//! Notebook Execution Core WASM Module
//!
//! This is the WASM module backing the browser notebook. It owns the
//! Cell-based notebook document and the multi-language execution pipeline:
//! dynamic compiler-toolchain loading, per-language compilation, execution
//! with a captured console, and component preview mounting.

pub mod api;
pub mod compile;
pub mod config;
pub mod errors;
pub mod models;
pub mod persist;
pub mod runner;
pub mod toolchain;
pub mod utils;

// Re-export commonly used types
pub use models::{Cell, CellLanguage, CellType, CompileResult, Notebook};
pub use runner::{ExecutionLog, RunOutcome};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Notebook execution core WASM module initialized");
}
