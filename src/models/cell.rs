//! Core cell data structures for the notebook
//!
//! This module defines the fundamental Cell record the execution pipeline
//! reads from and writes results back into. Field names are camelCased at
//! the serde boundary to match what the JavaScript shell stores.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of content a cell holds
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    /// Executable source in one of the supported languages
    Code,
    /// Markdown narration; rendered by the (external) live preview
    Markdown,
}

/// Language tag of a Code cell
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CellLanguage {
    #[default]
    Javascript,
    Typescript,
    React,
    #[serde(rename = "react-ts")]
    ReactTs,
}

impl CellLanguage {
    /// Parse the JS-side language string; unknown tags fall back to JavaScript.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "typescript" => CellLanguage::Typescript,
            "react" => CellLanguage::React,
            "react-ts" => CellLanguage::ReactTs,
            _ => CellLanguage::Javascript,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            CellLanguage::Javascript => "javascript",
            CellLanguage::Typescript => "typescript",
            CellLanguage::React => "react",
            CellLanguage::ReactTs => "react-ts",
        }
    }

    /// UI-producing languages compile through the React preset chain.
    pub fn is_react(&self) -> bool {
        matches!(self, CellLanguage::React | CellLanguage::ReactTs)
    }
}

/// The fundamental unit of notebook content
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Opaque unique id, stable for the cell's lifetime. Never reused,
    /// even across duplication.
    pub id: String,

    /// Content kind; not converted between kinds in normal flow
    #[serde(rename = "type")]
    pub cell_type: CellType,

    /// Raw source text authored by the user
    #[serde(default)]
    pub content: String,

    /// Language tag (Code cells only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<CellLanguage>,

    /// Last captured console transcript, newline-joined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Last captured failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Milliseconds elapsed for the last run (advisory only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,

    /// UI-only display flag; does not affect execution
    #[serde(default)]
    pub is_collapsed: bool,
}

impl Cell {
    /// Create a new code cell with a freshly generated id
    pub fn code(language: CellLanguage, content: impl Into<String>) -> Self {
        Self {
            id: generate_cell_id(),
            cell_type: CellType::Code,
            content: content.into(),
            language: Some(language),
            output: None,
            error: None,
            execution_time: None,
            is_collapsed: false,
        }
    }

    /// Create a new markdown cell with a freshly generated id
    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            id: generate_cell_id(),
            cell_type: CellType::Markdown,
            content: content.into(),
            language: None,
            output: None,
            error: None,
            execution_time: None,
            is_collapsed: false,
        }
    }

    /// Language the execution engine should use for this cell
    pub fn effective_language(&self) -> CellLanguage {
        self.language.unwrap_or_default()
    }

    /// Copy content/language into a brand-new cell: fresh id, results cleared
    pub fn duplicate(&self) -> Self {
        Self {
            id: generate_cell_id(),
            cell_type: self.cell_type,
            content: self.content.clone(),
            language: self.language,
            output: None,
            error: None,
            execution_time: None,
            is_collapsed: self.is_collapsed,
        }
    }

    /// Clear prior run results (called at the start of each run)
    pub fn clear_results(&mut self) {
        self.output = None;
        self.error = None;
        self.execution_time = None;
    }
}

/// Generate a cell id: epoch-millis timestamp plus a random suffix.
///
/// Uniqueness holds even for cells created in the same millisecond because
/// of the random suffix; ids are never recycled.
pub fn generate_cell_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("cell-{}-{}", timestamp_ms(), &suffix[..8])
}

#[cfg(target_arch = "wasm32")]
fn timestamp_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn timestamp_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}
