//! Normalized result of a toolchain transform

use serde::{Deserialize, Serialize};

/// Ephemeral value returned by the Compilation Adapter; never persisted.
///
/// On failure `code` carries the original source unmodified, so callers
/// that can degrade to raw execution (the TypeScript path) do not need to
/// keep a second copy around.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CompileResult {
    pub code: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompileResult {
    pub fn success(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            success: true,
            error: None,
        }
    }

    pub fn failure(source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            code: source.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}
