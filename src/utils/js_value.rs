//! Display and error-message helpers for values crossing the JS boundary

use wasm_bindgen::{JsCast, JsValue};

/// Render a JS value the way the browser console would, for the captured
/// transcript. Strings pass through unquoted; numbers drop a trailing `.0`;
/// everything else goes through JSON.
pub fn display(value: &JsValue) -> String {
    if value.is_undefined() {
        return "undefined".to_string();
    }
    if value.is_null() {
        return "null".to_string();
    }
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(n) = value.as_f64() {
        if n.fract() == 0.0 && n.abs() < 1e15 {
            return format!("{}", n as i64);
        }
        return format!("{}", n);
    }
    if let Some(b) = value.as_bool() {
        return b.to_string();
    }
    match js_sys::JSON::stringify(value) {
        Ok(s) => s
            .as_string()
            .unwrap_or_else(|| "[unserializable value]".to_string()),
        Err(_) => "[unserializable value]".to_string(),
    }
}

/// Extract a human-readable message from a thrown JS value.
///
/// Thrown values are usually `Error` instances, but user code can throw
/// anything; fall through string and JSON forms before giving up.
pub fn error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Ok(s) = js_sys::JSON::stringify(value) {
        if let Some(s) = s.as_string() {
            return s;
        }
    }
    "unknown JavaScript error".to_string()
}
