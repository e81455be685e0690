//! Browser tests for the execution pipeline
//!
//! Exercises the WASM API end-to-end in a real browser: state loading,
//! cell runs with captured console output, loader memoization, and the
//! persistence wiring. Tests that need the rendering library install small
//! fakes for `React`/`ReactDOM`, so mounting is observable without a CDN.
//! Paths that need the compiler toolchain assert the offline behavior too.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use wasm_bindgen_test::*;

use notebook_wasm::api::{
    add_cell, duplicate_cell, get_notebook, new_notebook, run_cell, save_notebook,
    set_cell_content, set_persistence_service,
};
use notebook_wasm::toolchain::loader;

wasm_bindgen_test_configure!(run_in_browser);

fn get(value: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

fn get_str(value: &JsValue, key: &str) -> Option<String> {
    get(value, key).as_string()
}

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    let _ = JsFuture::from(promise).await;
}

/// Fresh notebook with one code cell; returns the cell id
fn notebook_with_code_cell(language: &str, content: &str) -> String {
    new_notebook("browser-test", None).unwrap();
    let cell = add_cell("code", Some(language.to_string()), None).unwrap();
    let id = get_str(&cell, "id").unwrap();
    set_cell_content(&id, content).unwrap();
    id
}

/// Create the preview container the render phase mounts into
fn create_preview_node(cell_id: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let node = document.create_element("div").unwrap();
    node.set_id(&format!("react-preview-{}", cell_id));
    document.body().unwrap().append_child(&node).unwrap();
    node
}

/// Install minimal React/ReactDOM fakes good enough to mount components.
/// `createElement` counts its invocations so tests can assert it was never
/// reached.
fn install_rendering_fakes() {
    js_sys::eval(
        r#"
        if (!window.React || window.React.__testFake) {
            window.__createElementCalls = window.__createElementCalls || 0;
            window.React = {
                __testFake: true,
                createElement: function (type, props) {
                    window.__createElementCalls += 1;
                    var children = Array.prototype.slice.call(arguments, 2);
                    return { type: type, props: props || {}, children: children };
                }
            };
            window.ReactDOM = {
                __testFake: true,
                render: function (element, node) {
                    function renderText(el) {
                        if (el === null || el === undefined) { return ""; }
                        if (typeof el === "string" || typeof el === "number") { return String(el); }
                        if (typeof el.type === "function") { return renderText(el.type(el.props)); }
                        return el.children.map(renderText).join("");
                    }
                    node.textContent = renderText(element);
                }
            };
        }
        "#,
    )
    .unwrap();
}

fn create_element_calls() -> f64 {
    js_sys::eval("window.__createElementCalls || 0")
        .unwrap()
        .as_f64()
        .unwrap()
}

/// Replace the toolchain global with a deterministic fake so compile paths
/// run without a network. The passthrough fake returns the source
/// unchanged; the failing fake throws like a syntax error would.
fn install_fake_toolchain(passthrough: bool) {
    let script = if passthrough {
        "window.Babel = { transform: function (source, options) { return { code: source }; } };"
    } else {
        "window.Babel = { transform: function () { throw new Error('unexpected token'); } };"
    };
    js_sys::eval(script).unwrap();
}

#[wasm_bindgen_test]
async fn javascript_cell_captures_console_output() {
    let id = notebook_with_code_cell("javascript", "console.log(1 + 1)");
    let settled = run_cell(id).await.unwrap();

    let output = get_str(&settled, "output").unwrap();
    assert!(output.contains('2'), "output was: {}", output);
    assert!(get(&settled, "error").is_undefined());
    assert!(get(&settled, "executionTime").as_f64().unwrap() >= 0.0);
}

#[wasm_bindgen_test]
async fn runtime_error_settles_with_partial_log() {
    let id = notebook_with_code_cell(
        "javascript",
        "console.log('before'); throw new Error('boom');",
    );
    let settled = run_cell(id).await.unwrap();

    let output = get_str(&settled, "output").unwrap();
    let error = get_str(&settled, "error").unwrap();
    assert!(output.contains("before"), "output was: {}", output);
    assert!(error.contains("boom"), "error was: {}", error);
    assert!(get(&settled, "executionTime").as_f64().is_some());
}

#[wasm_bindgen_test]
async fn running_twice_is_idempotent() {
    let id = notebook_with_code_cell("javascript", "console.log('same')");
    let first = run_cell(id.clone()).await.unwrap();
    let second = run_cell(id).await.unwrap();
    assert_eq!(get_str(&first, "output"), get_str(&second, "output"));
}

#[wasm_bindgen_test]
async fn markdown_cell_narrates_instead_of_executing() {
    new_notebook("browser-test", None).unwrap();
    let cell = add_cell("markdown", None, None).unwrap();
    let id = get_str(&cell, "id").unwrap();
    set_cell_content(&id, "# Title\n- point one").unwrap();

    let settled = run_cell(id).await.unwrap();
    let output = get_str(&settled, "output").unwrap();
    assert!(output.contains("Heading 1: Title"), "output was: {}", output);
    assert!(output.contains("Bullet: point one"));
    assert!(get(&settled, "error").is_undefined());
}

#[wasm_bindgen_test]
async fn typescript_cell_runs_whether_or_not_toolchain_loads() {
    // Valid TypeScript that is also valid JavaScript: the run succeeds via
    // the compiled output when the toolchain is reachable and via the
    // raw-source fallback when it is not.
    let id = notebook_with_code_cell("typescript", "const x = 5; console.log(x * 2)");
    let settled = run_cell(id).await.unwrap();

    let output = get_str(&settled, "output").unwrap();
    assert!(output.contains("10"), "output was: {}", output);
    assert!(get(&settled, "error").is_undefined());
}

fn count_toolchain_tags() -> u32 {
    let document = web_sys::window().unwrap().document().unwrap();
    let scripts = document.get_elements_by_tag_name("script");
    let mut count = 0;
    for i in 0..scripts.length() {
        let script: web_sys::HtmlScriptElement = scripts.item(i).unwrap().unchecked_into();
        if script.src().contains("babel") {
            count += 1;
        }
    }
    count
}

#[wasm_bindgen_test]
async fn concurrent_loader_calls_inject_at_most_one_script_tag() {
    // Other tests may already have triggered a load; only the delta from
    // this pair of calls matters. Start both eagerly so they overlap; the
    // second must join the first's in-flight promise instead of injecting
    // its own tag.
    let before = count_toolchain_tags();
    let first = future_to_promise(async {
        let _ = loader::ensure_loaded().await;
        Ok(JsValue::NULL)
    });
    let second = future_to_promise(async {
        let _ = loader::ensure_loaded().await;
        Ok(JsValue::NULL)
    });
    let _ = JsFuture::from(first).await;
    let _ = JsFuture::from(second).await;

    let after = count_toolchain_tags();
    assert!(after - before <= 1, "two concurrent loads injected {} tags", after - before);
}

#[wasm_bindgen_test]
async fn react_cell_compiles_executes_and_mounts() {
    install_fake_toolchain(true);
    install_rendering_fakes();
    let id = notebook_with_code_cell(
        "react",
        "function App() { return React.createElement(\"div\", null, \"hi\"); }",
    );
    let node = create_preview_node(&id);

    let settled = run_cell(id).await.unwrap();

    assert!(get(&settled, "error").is_undefined());
    assert!(get(&settled, "executionTime").as_f64().is_some());
    let output = get_str(&settled, "output").unwrap();
    assert!(output.contains("Rendering component preview"), "output was: {}", output);
    let text = node.text_content().unwrap_or_default();
    assert!(text.contains("hi"), "mounted text was: {}", text);
}

#[wasm_bindgen_test]
async fn react_cell_without_component_mounts_placeholder() {
    install_fake_toolchain(true);
    install_rendering_fakes();
    let id = notebook_with_code_cell("react", "const answer = 41 + 1; console.log(answer);");
    let node = create_preview_node(&id);

    let settled = run_cell(id).await.unwrap();

    // No component anywhere: still a success, placeholder mounted
    assert!(get(&settled, "error").is_undefined());
    let text = node.text_content().unwrap_or_default();
    assert!(
        text.contains("Component executed successfully"),
        "mounted text was: {}",
        text
    );
    let output = get_str(&settled, "output").unwrap();
    assert!(output.contains("42"), "output was: {}", output);
}

#[wasm_bindgen_test]
async fn react_compile_failure_aborts_before_execution() {
    install_fake_toolchain(false);
    install_rendering_fakes();
    let id = notebook_with_code_cell("react", "<NotEvenClose");
    create_preview_node(&id);

    let calls_before = create_element_calls();
    let settled = run_cell(id).await.unwrap();

    let error = get_str(&settled, "error").unwrap();
    assert!(error.contains("unexpected token"), "error was: {}", error);
    // The source was never executed and nothing was mounted
    let output = get_str(&settled, "output").unwrap();
    assert!(!output.contains("Executing component definition"));
    assert_eq!(create_element_calls(), calls_before);
}

#[wasm_bindgen_test]
async fn duplicate_cell_via_api_clears_results() {
    let id = notebook_with_code_cell("javascript", "console.log('dup')");
    let _ = run_cell(id.clone()).await.unwrap();

    let copy = duplicate_cell(&id).unwrap();
    assert_ne!(get_str(&copy, "id").unwrap(), id);
    assert!(get(&copy, "output").is_undefined());
    assert!(get(&copy, "error").is_undefined());
    assert!(get(&copy, "executionTime").is_undefined());
}

#[wasm_bindgen_test]
async fn first_save_creates_then_later_saves_update() {
    let service = js_sys::eval(
        r#"({
            calls: [],
            createNotebook: function (payload) { this.calls.push(["create"]); return Promise.resolve("nb-42"); },
            updateNotebook: function (id, payload) { this.calls.push(["update", id]); return Promise.resolve(); },
            deleteNotebook: function (id) { this.calls.push(["delete", id]); return Promise.resolve(); }
        })"#,
    )
    .unwrap();
    set_persistence_service(service.clone().unchecked_into());

    let id = notebook_with_code_cell("javascript", "console.log('save me')");
    save_notebook().unwrap();
    sleep_ms(50).await;

    // The store assigned an id on create, recorded into WASM state
    let notebook = get_notebook().unwrap();
    assert_eq!(get_str(&notebook, "id").as_deref(), Some("nb-42"));

    set_cell_content(&id, "console.log('edited')").unwrap();
    save_notebook().unwrap();
    sleep_ms(50).await;

    let calls: js_sys::Array = get(&service, "calls").unchecked_into();
    assert!(calls.length() >= 2);
    let last: js_sys::Array = calls.get(calls.length() - 1).unchecked_into();
    assert_eq!(last.get(0).as_string().as_deref(), Some("update"));
    assert_eq!(last.get(1).as_string().as_deref(), Some("nb-42"));
}
