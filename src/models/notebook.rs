//! Notebook document structure and cell-list operations
//!
//! The notebook is the canonical, WASM-owned source of truth: an ordered
//! sequence of cells plus document metadata. All mutation primitives live
//! here; the API layer wraps them and triggers the debounced persistence
//! path after each one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::cell::{Cell, CellLanguage, CellType};
use crate::errors::ModelError;

/// An ordered sequence of cells plus document metadata
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    /// Document-store id; absent until the first successful create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_public: bool,

    /// Opaque owning-user reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    /// RFC 3339 timestamps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Create a new, not-yet-persisted notebook
    pub fn new(title: impl Into<String>, owner_id: Option<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            tags: Vec::new(),
            is_public: false,
            owner_id,
            created_at: Some(now.clone()),
            updated_at: Some(now),
            cells: Vec::new(),
        }
    }

    /// Bump the modification timestamp; called by every mutation primitive
    pub fn touch(&mut self) {
        self.updated_at = Some(chrono::Utc::now().to_rfc3339());
    }

    /// Cell ids must be unique within one notebook. Checked on load so a
    /// corrupted document is rejected before any run can target it.
    pub fn validate_unique_ids(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for cell in &self.cells {
            if !seen.insert(cell.id.as_str()) {
                return Err(ModelError::DuplicateCellId(cell.id.clone()));
            }
        }
        Ok(())
    }

    pub fn find_cell(&self, cell_id: &str) -> Result<&Cell, ModelError> {
        self.cells
            .iter()
            .find(|c| c.id == cell_id)
            .ok_or_else(|| ModelError::CellNotFound(cell_id.to_string()))
    }

    pub fn find_cell_mut(&mut self, cell_id: &str) -> Result<&mut Cell, ModelError> {
        self.cells
            .iter_mut()
            .find(|c| c.id == cell_id)
            .ok_or_else(|| ModelError::CellNotFound(cell_id.to_string()))
    }

    /// Insert a fresh cell at `index` (clamped to the cell count) and
    /// return a clone of it.
    pub fn add_cell(
        &mut self,
        cell_type: CellType,
        language: Option<CellLanguage>,
        index: Option<usize>,
    ) -> Cell {
        let cell = match cell_type {
            CellType::Code => Cell::code(language.unwrap_or_default(), ""),
            CellType::Markdown => Cell::markdown(""),
        };
        let at = index.unwrap_or(self.cells.len()).min(self.cells.len());
        self.cells.insert(at, cell.clone());
        self.touch();
        cell
    }

    pub fn delete_cell(&mut self, cell_id: &str) -> Result<Cell, ModelError> {
        let idx = self.index_of(cell_id)?;
        let removed = self.cells.remove(idx);
        self.touch();
        Ok(removed)
    }

    /// Copy content/language into a new cell inserted right after the
    /// original. The copy gets a fresh id and cleared results.
    pub fn duplicate_cell(&mut self, cell_id: &str) -> Result<Cell, ModelError> {
        let idx = self.index_of(cell_id)?;
        let copy = self.cells[idx].duplicate();
        self.cells.insert(idx + 1, copy.clone());
        self.touch();
        Ok(copy)
    }

    /// Splice the cell at `from` out and re-insert it at `to`.
    /// Reordering never triggers re-execution; document order is
    /// execution-independent.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), ModelError> {
        let len = self.cells.len();
        if from >= len {
            return Err(ModelError::IndexOutOfRange { index: from, len });
        }
        if to >= len {
            return Err(ModelError::IndexOutOfRange { index: to, len });
        }
        let cell = self.cells.remove(from);
        self.cells.insert(to, cell);
        self.touch();
        Ok(())
    }

    /// Flip the display flag; returns the new state
    pub fn toggle_collapse(&mut self, cell_id: &str) -> Result<bool, ModelError> {
        let cell = self.find_cell_mut(cell_id)?;
        cell.is_collapsed = !cell.is_collapsed;
        let collapsed = cell.is_collapsed;
        self.touch();
        Ok(collapsed)
    }

    pub fn set_content(&mut self, cell_id: &str, content: &str) -> Result<(), ModelError> {
        let cell = self.find_cell_mut(cell_id)?;
        cell.content = content.to_string();
        self.touch();
        Ok(())
    }

    /// Reset every cell's run results
    pub fn clear_all_outputs(&mut self) {
        for cell in &mut self.cells {
            cell.clear_results();
        }
        self.touch();
    }

    fn index_of(&self, cell_id: &str) -> Result<usize, ModelError> {
        self.cells
            .iter()
            .position(|c| c.id == cell_id)
            .ok_or_else(|| ModelError::CellNotFound(cell_id.to_string()))
    }
}
