//! Per-language preset chains for the toolchain transform
//!
//! Chains are built as plain JSON so their shape is unit-testable without a
//! browser; the adapter mirrors them to a JS object at call time. Babel
//! applies presets in reverse list order, so `typescript` stripping runs
//! before `env` down-leveling, and `react` JSX transformation runs first of
//! all.

use serde_json::{json, Value};

use crate::config::BROWSER_TARGETS;

/// Options for the TypeScript path: strip types, then down-level syntax.
/// No type-checking happens anywhere; type errors are silently ignored.
pub fn typescript_options() -> Value {
    json!({
        "presets": [
            ["env", { "targets": BROWSER_TARGETS }],
            "typescript",
        ],
    })
}

/// Options for the React path: transform JSX (classic runtime, so the
/// output calls `React.createElement` directly), optionally strip types
/// first, then down-level.
pub fn react_options(is_typescript: bool) -> Value {
    let mut presets = vec![json!(["env", { "targets": BROWSER_TARGETS }])];
    if is_typescript {
        presets.push(json!("typescript"));
    }
    presets.push(json!(["react", { "runtime": "classic" }]));
    json!({ "presets": presets })
}
