//! Module-wide configuration constants
//!
//! Central place for the pinned toolchain URL, the browser globals the
//! execution pipeline consumes, and the timing knobs of the persistence path.

/// Version-pinned CDN location of the Babel standalone bundle.
///
/// The loader injects exactly one `<script>` tag pointing here; bumping the
/// version is a deliberate, reviewed change because the preset names below
/// must stay in sync with the bundle.
pub const TOOLCHAIN_CDN_URL: &str = "https://unpkg.com/@babel/standalone@7.24.7/babel.min.js";

/// Name of the global object the toolchain bundle installs on `window`.
pub const TOOLCHAIN_GLOBAL: &str = "Babel";

/// Name of the global React namespace (createElement factory).
pub const REACT_GLOBAL: &str = "React";

/// Name of the global ReactDOM namespace (render / createRoot).
pub const REACT_DOM_GLOBAL: &str = "ReactDOM";

/// Browserslist query handed to the `env` preset.
pub const BROWSER_TARGETS: &str = "> 0.25%, not dead";

/// Delay between the last cell edit and the debounced notebook save.
pub const SAVE_DEBOUNCE_MS: i32 = 1000;

/// DOM id of the per-cell preview container the render phase mounts into.
pub fn preview_node_id(cell_id: &str) -> String {
    format!("react-preview-{}", cell_id)
}
