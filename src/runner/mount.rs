//! Preview mounting
//!
//! Wraps the discovered component in a rendering-library element and mounts
//! it into the cell's preview container. The mount API is feature-detected:
//! legacy `ReactDOM.render(element, node)` first, then `createRoot(node)` +
//! `root.render(element)`. When both are missing the run fails hard with
//! "rendering library not available".
//!
//! Policy: the preview is never left blank. Mount failures replace the
//! container's content with an inline error panel, and a successful
//! compile+execute with no discoverable component mounts a placeholder.

use wasm_bindgen::{JsCast, JsValue};

use crate::config::{self, REACT_DOM_GLOBAL, REACT_GLOBAL};
use crate::errors::ExecutionError;
use crate::utils::{html, js_value};

/// Text the synthesized placeholder component renders
pub const FALLBACK_NOTICE: &str = "Component executed successfully";

fn page_global(name: &str) -> Option<js_sys::Object> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        value.dyn_into().ok()
    }
}

/// The React namespace (createElement factory); read, never reassigned
pub fn react_global() -> Result<js_sys::Object, ExecutionError> {
    page_global(REACT_GLOBAL).ok_or(ExecutionError::RendererUnavailable)
}

/// `React.createElement(component, null)`
pub fn create_element(
    react: &js_sys::Object,
    component: &JsValue,
) -> Result<JsValue, ExecutionError> {
    let factory: js_sys::Function =
        js_sys::Reflect::get(react, &JsValue::from_str("createElement"))
            .ok()
            .and_then(|f| f.dyn_into().ok())
            .ok_or(ExecutionError::RendererUnavailable)?;
    factory
        .call2(react, component, &JsValue::NULL)
        .map_err(|err| ExecutionError::Render(js_value::error_message(&err)))
}

/// Synthesize the placeholder component mounted when discovery finds
/// nothing. Built as a real function component with the live React handle
/// pre-bound, so the mount path treats it like any user component.
pub fn fallback_component(react: &js_sys::Object) -> JsValue {
    let body = format!(
        "return React.createElement(\"div\", {{ className: \"fallback-component\" }}, \"{}\");",
        FALLBACK_NOTICE
    );
    let factory = js_sys::Function::new_with_args("React", &body);
    factory.bind1(&JsValue::NULL, react).into()
}

/// Mount an element into the cell's preview container, clearing any
/// previous mount content first.
pub fn mount(element: &JsValue, cell_id: &str) -> Result<(), ExecutionError> {
    let node_id = config::preview_node_id(cell_id);
    let node = preview_node(&node_id).ok_or(ExecutionError::MountNodeMissing(node_id))?;
    node.set_inner_html("");

    let react_dom = page_global(REACT_DOM_GLOBAL).ok_or(ExecutionError::RendererUnavailable)?;

    // Legacy synchronous render API first
    if let Some(render) = method(&react_dom, "render") {
        render
            .call2(&react_dom, element, &node)
            .map_err(|err| ExecutionError::Render(js_value::error_message(&err)))?;
        return Ok(());
    }

    // Concurrent-root API second
    if let Some(create_root) = method(&react_dom, "createRoot") {
        let root = create_root
            .call1(&react_dom, &node)
            .map_err(|err| ExecutionError::Render(js_value::error_message(&err)))?;
        let root_render = method_of(&root, "render").ok_or(ExecutionError::RendererUnavailable)?;
        root_render
            .call1(&root, element)
            .map_err(|err| ExecutionError::Render(js_value::error_message(&err)))?;
        return Ok(());
    }

    Err(ExecutionError::RendererUnavailable)
}

/// Replace the preview container's content with an inline error panel.
/// Best-effort: if the container is missing there is nothing to write into.
pub fn write_error_panel(cell_id: &str, message: &str) {
    let node_id = config::preview_node_id(cell_id);
    if let Some(node) = preview_node(&node_id) {
        node.set_inner_html(&format!(
            "<div class=\"render-error\" style=\"color:#b91c1c;padding:8px;font-family:monospace;white-space:pre-wrap;\">{}</div>",
            html::escape(message)
        ));
    }
}

fn preview_node(node_id: &str) -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(node_id)
}

fn method(object: &js_sys::Object, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(object, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into().ok())
}

fn method_of(value: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(value, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into().ok())
}
