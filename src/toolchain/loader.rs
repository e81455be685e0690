//! Dynamic toolchain loader
//!
//! Injects the version-pinned Babel standalone bundle into the page at most
//! once. Concurrent callers share a single in-flight promise; a rejected
//! load is evicted from the memo slot so the next call retries (the loader
//! itself never auto-retries).

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::config::{TOOLCHAIN_CDN_URL, TOOLCHAIN_GLOBAL};
use crate::errors::ToolchainError;
use crate::utils::js_value;

/// Process-wide "toolchain ready" flag, set once a load has succeeded or
/// the global was found already present.
static TOOLCHAIN_READY: AtomicBool = AtomicBool::new(false);

thread_local! {
    /// The single in-flight load promise all concurrent callers join.
    /// Published before the first await so late callers never inject a
    /// second script tag.
    static INFLIGHT_LOAD: RefCell<Option<js_sys::Promise>> = RefCell::new(None);
}

/// Readiness check; true once a load has completed successfully.
pub fn toolchain_ready() -> bool {
    TOOLCHAIN_READY.load(Ordering::Relaxed)
}

/// The toolchain global object, if present on the window.
pub fn toolchain_global() -> Option<js_sys::Object> {
    let window = web_sys::window()?;
    let global = js_sys::Reflect::get(&window, &JsValue::from_str(TOOLCHAIN_GLOBAL)).ok()?;
    if global.is_undefined() || global.is_null() {
        None
    } else {
        global.dyn_into().ok()
    }
}

/// Ensure the toolchain bundle is loaded into the page.
///
/// Resolves `true` immediately when the global already exists; otherwise
/// joins or starts the single in-flight script load. Rejects with a
/// descriptive error on load failure and leaves no partial state behind.
pub async fn ensure_loaded() -> Result<bool, ToolchainError> {
    if toolchain_global().is_some() {
        TOOLCHAIN_READY.store(true, Ordering::Relaxed);
        return Ok(true);
    }

    let promise = INFLIGHT_LOAD.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(pending) = slot.as_ref() {
            log::debug!("toolchain load already in flight, joining");
            return pending.clone();
        }
        log::info!("injecting compiler toolchain script: {}", TOOLCHAIN_CDN_URL);
        let pending = inject_script();
        *slot = Some(pending.clone());
        pending
    });

    match JsFuture::from(promise).await {
        Ok(_) => {
            TOOLCHAIN_READY.store(true, Ordering::Relaxed);
            Ok(true)
        }
        Err(err) => {
            // Evict the rejected promise so a later call can retry the load.
            INFLIGHT_LOAD.with(|slot| slot.borrow_mut().take());
            Err(ToolchainError::ScriptLoad(js_value::error_message(&err)))
        }
    }
}

/// Build the promise that settles when the injected script loads or errors.
fn inject_script() -> js_sys::Promise {
    js_sys::Promise::new(&mut |resolve: js_sys::Function, reject: js_sys::Function| {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => {
                let _ = reject.call1(
                    &JsValue::NULL,
                    &JsValue::from_str("no document available for script injection"),
                );
                return;
            }
        };

        let script: web_sys::HtmlScriptElement = match document
            .create_element("script")
            .ok()
            .and_then(|el| el.dyn_into().ok())
        {
            Some(s) => s,
            None => {
                let _ = reject.call1(
                    &JsValue::NULL,
                    &JsValue::from_str("failed to create script element"),
                );
                return;
            }
        };
        script.set_type("text/javascript");
        script.set_src(TOOLCHAIN_CDN_URL);

        let onload = Closure::once_into_js(move || {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::TRUE);
        });
        script.set_onload(Some(onload.unchecked_ref()));

        let reject_onerror = reject.clone();
        let onerror = Closure::once_into_js(move |_event: JsValue| {
            let _ = reject_onerror.call1(
                &JsValue::NULL,
                &js_sys::Error::new(&format!(
                    "failed to load compiler toolchain from {}",
                    TOOLCHAIN_CDN_URL
                )),
            );
        });
        script.set_onerror(Some(onerror.unchecked_ref()));

        let attached = match document.head() {
            Some(head) => head.append_child(&script).is_ok(),
            None => document
                .body()
                .map(|body| body.append_child(&script).is_ok())
                .unwrap_or(false),
        };
        if !attached {
            let _ = reject.call1(
                &JsValue::NULL,
                &JsValue::from_str("failed to attach script element to the document"),
            );
        }
    })
}
