//! Component discovery
//!
//! After a React cell executes, something has to be mounted. The primary
//! contract is the `exportedComponent` slot the export rewrite assigns to,
//! resolved in-scope by the discovery epilogue appended to the executed
//! function body. When the epilogue returns nothing, this module scans the
//! page's global bindings as a compatibility fallback: first `App`, then
//! the first uppercase-named callable. Finding nothing is NOT an error;
//! the engine substitutes a placeholder component instead.

use wasm_bindgen::{JsCast, JsValue};

use crate::compile::rewrite::EXPORT_SLOT;

/// Global the fallback scan prefers after the export slot.
pub const APP_GLOBAL: &str = "App";

/// Statement appended to the compiled body so the single execution's
/// return value IS the component. `typeof` keeps undeclared names from
/// throwing.
pub const DISCOVERY_EPILOGUE: &str = "\n;return (function () {\n  if (typeof exportedComponent === \"function\") { return exportedComponent; }\n  if (typeof App === \"function\") { return App; }\n  return undefined;\n})();";

/// Where a component was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// The well-known export slot (primary contract)
    ExportSlot,
    /// The conventional `App` binding
    AppGlobal,
    /// Legacy shim: first uppercase-named callable found by scanning
    Scanned(String),
    NotFound,
}

/// A scope the fallback scan can interrogate. The browser implementation
/// wraps the page's global object; tests supply a fake.
pub trait ComponentScope {
    /// Names of bindings visible in the scope, in definition order
    fn binding_names(&self) -> Vec<String>;
    fn is_callable(&self, name: &str) -> bool;
}

/// Priority-ordered discovery over a scope: export slot, `App`, then the
/// uppercase-callable scan.
pub fn discover<S: ComponentScope>(scope: &S) -> Discovery {
    if scope.is_callable(EXPORT_SLOT) {
        return Discovery::ExportSlot;
    }
    if scope.is_callable(APP_GLOBAL) {
        return Discovery::AppGlobal;
    }
    for name in scope.binding_names() {
        if name != EXPORT_SLOT
            && name != APP_GLOBAL
            && name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            && scope.is_callable(&name)
        {
            return Discovery::Scanned(name);
        }
    }
    Discovery::NotFound
}

/// Scope backed by the page's global object
pub struct GlobalScope {
    global: js_sys::Object,
}

impl GlobalScope {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        Some(Self {
            global: window.unchecked_into(),
        })
    }

    /// Resolve a discovered binding back to its value
    pub fn get(&self, name: &str) -> Option<JsValue> {
        let value = js_sys::Reflect::get(&self.global, &JsValue::from_str(name)).ok()?;
        if value.is_undefined() || value.is_null() {
            None
        } else {
            Some(value)
        }
    }

    /// Resolve the outcome of `discover` to the component value itself
    pub fn resolve(&self, discovery: &Discovery) -> Option<JsValue> {
        match discovery {
            Discovery::ExportSlot => self.get(EXPORT_SLOT),
            Discovery::AppGlobal => self.get(APP_GLOBAL),
            Discovery::Scanned(name) => self.get(name),
            Discovery::NotFound => None,
        }
    }
}

impl ComponentScope for GlobalScope {
    fn binding_names(&self) -> Vec<String> {
        js_sys::Object::keys(&self.global)
            .iter()
            .filter_map(|k| k.as_string())
            .collect()
    }

    fn is_callable(&self, name: &str) -> bool {
        self.get(name)
            .map(|v| v.is_instance_of::<js_sys::Function>())
            .unwrap_or(false)
    }
}
