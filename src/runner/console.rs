//! Capturing console
//!
//! Each run constructs a fresh console object whose `log`/`info`/`warn`/
//! `error` methods append to a line buffer instead of the browser console.
//! The object is injected into the executed function body under the name
//! `console`, shadowing the real one for the duration of the run.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::utils::js_value;

/// Console methods the capture shadows. Anything else (`table`, `group`,
/// ...) falls through to `undefined` and throws in user code, same as the
/// system this replaces.
const CAPTURED_METHODS: [&str; 4] = ["log", "info", "warn", "error"];

pub struct CapturedConsole {
    object: js_sys::Object,
    lines: Rc<RefCell<Vec<String>>>,
    // Keeps the method closures alive for the lifetime of the run
    _closures: Vec<Closure<dyn FnMut(JsValue, JsValue, JsValue)>>,
}

impl CapturedConsole {
    pub fn new() -> Self {
        let object = js_sys::Object::new();
        let lines: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let mut closures = Vec::with_capacity(CAPTURED_METHODS.len());

        for method in CAPTURED_METHODS {
            let sink = Rc::clone(&lines);
            // Up to three arguments; console calls with more are rare in
            // cell code and the overflow is simply dropped.
            let closure = Closure::wrap(Box::new(move |a: JsValue, b: JsValue, c: JsValue| {
                let mut parts = vec![js_value::display(&a)];
                if !b.is_undefined() {
                    parts.push(js_value::display(&b));
                }
                if !c.is_undefined() {
                    parts.push(js_value::display(&c));
                }
                sink.borrow_mut().push(parts.join(" "));
            })
                as Box<dyn FnMut(JsValue, JsValue, JsValue)>);

            let _ = js_sys::Reflect::set(
                &object,
                &JsValue::from_str(method),
                closure.as_ref().unchecked_ref(),
            );
            closures.push(closure);
        }

        Self {
            object,
            lines,
            _closures: closures,
        }
    }

    /// The object to inject as the `console` parameter
    pub fn object(&self) -> &js_sys::Object {
        &self.object
    }

    /// Snapshot of everything captured so far, in call order
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Default for CapturedConsole {
    fn default() -> Self {
        Self::new()
    }
}
