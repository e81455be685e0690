//! Toolchain invocation per language
//!
//! Both entry points first await the loader. A loader failure degrades to
//! `{ code: source, success: false }`: the TypeScript caller falls back to
//! raw execution, while the React caller treats the same result as a hard
//! stop because unmodified JSX cannot run as plain script.

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use crate::config::TOOLCHAIN_GLOBAL;
use crate::errors::ToolchainError;
use crate::models::CompileResult;
use crate::toolchain::{loader, presets};
use crate::utils::js_value;

/// Compile TypeScript to plain JavaScript. Type errors are ignored; only
/// syntax errors surface.
pub async fn compile_typescript(source: &str) -> CompileResult {
    if let Err(err) = loader::ensure_loaded().await {
        log::warn!("toolchain unavailable for TypeScript compile: {}", err);
        return CompileResult::failure(source, err.to_string());
    }
    transform(source, presets::typescript_options())
}

/// Compile a React (optionally TypeScript) cell. Rewrites `export`
/// statements first so the compiled output can execute as a script.
pub async fn compile_react(source: &str, is_typescript: bool) -> CompileResult {
    if let Err(err) = loader::ensure_loaded().await {
        log::warn!("toolchain unavailable for React compile: {}", err);
        return CompileResult::failure(source, err.to_string());
    }
    let rewritten = super::rewrite::rewrite_exports(source);
    match transform(&rewritten, presets::react_options(is_typescript)) {
        // Report failures against the original source; the rewrite is an
        // internal detail the user never sees.
        CompileResult {
            success: false,
            error,
            ..
        } => CompileResult {
            code: source.to_string(),
            success: false,
            error,
        },
        ok => ok,
    }
}

/// Invoke `Babel.transform(source, options)` and normalize the outcome.
fn transform(source: &str, options: serde_json::Value) -> CompileResult {
    let babel = match loader::toolchain_global() {
        Some(b) => b,
        None => {
            return CompileResult::failure(
                source,
                ToolchainError::GlobalMissing(TOOLCHAIN_GLOBAL).to_string(),
            )
        }
    };

    let transform_fn: js_sys::Function =
        match js_sys::Reflect::get(&babel, &JsValue::from_str("transform"))
            .ok()
            .and_then(|f| f.dyn_into().ok())
        {
            Some(f) => f,
            None => {
                return CompileResult::failure(
                    source,
                    "toolchain global has no transform entry point",
                )
            }
        };

    // Plain objects, not Maps: the toolchain reads `options.presets`.
    let options_js = match options.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(v) => v,
        Err(err) => {
            return CompileResult::failure(source, format!("failed to build options: {}", err))
        }
    };

    match transform_fn.call2(&babel, &JsValue::from_str(source), &options_js) {
        Ok(result) => {
            let code = js_sys::Reflect::get(&result, &JsValue::from_str("code"))
                .ok()
                .and_then(|c| c.as_string())
                .unwrap_or_default();
            CompileResult::success(code)
        }
        Err(err) => CompileResult::failure(
            source,
            ToolchainError::Transform(js_value::error_message(&err)).to_string(),
        ),
    }
}
