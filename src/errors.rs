//! Error types for the notebook execution core
//!
//! Defines the error hierarchy for the pipeline, split by failure domain:
//! toolchain loading/invocation, per-run execution, and data-model
//! operations. All of these are stringified at the JS boundary; none of
//! them crosses it as a panic.

use thiserror::Error;

/// Errors raised while loading or invoking the compiler toolchain
#[derive(Debug, Clone, Error)]
pub enum ToolchainError {
    /// The CDN script failed to load (network error, blocked, bad URL)
    #[error("compiler toolchain failed to load: {0}")]
    ScriptLoad(String),

    /// The toolchain global is missing even though a load reported success
    #[error("compiler toolchain global '{0}' is not present on the page")]
    GlobalMissing(&'static str),

    /// The toolchain rejected the source (syntax error in the cell)
    #[error("{0}")]
    Transform(String),
}

/// Errors that settle a run in the error state
#[derive(Debug, Clone, Error)]
pub enum ExecutionError {
    /// Compilation failed and the language cannot fall back to raw source
    #[error("compilation failed: {0}")]
    Compile(String),

    /// The cell body threw while executing
    #[error("{0}")]
    Runtime(String),

    /// Neither the legacy render API nor createRoot is available
    #[error("rendering library not available")]
    RendererUnavailable,

    /// The per-cell preview container is missing from the document
    #[error("preview container '{0}' not found in the document")]
    MountNodeMissing(String),

    /// createElement / mount threw
    #[error("render failed: {0}")]
    Render(String),
}

/// Errors from cell/notebook data-model operations
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("cell '{0}' not found")]
    CellNotFound(String),

    #[error("cell index {index} out of range (cell count {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("duplicate cell id '{0}' in notebook")]
    DuplicateCellId(String),
}
