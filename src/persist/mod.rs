//! Persistence collaborator
//!
//! The document store lives on the JavaScript side (a backend-as-a-service
//! SDK). The shell injects a service object exposing `createNotebook`,
//! `getNotebook`, `updateNotebook`, `deleteNotebook`, `getAllNotebooks`;
//! this module only calls `createNotebook` on first save and
//! `updateNotebook` afterwards.
//!
//! Saves triggered by cell edits are debounced: every mutation re-arms a
//! timer, and only the timer firing (or an explicit save) touches the
//! network. A save and an in-flight run may interleave arbitrarily.

use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::api::state;
use crate::models::Notebook;

thread_local! {
    static SERVICE: RefCell<Option<js_sys::Object>> = RefCell::new(None);
    static DEBOUNCE: RefCell<Option<DebounceState>> = RefCell::new(None);
}

/// An armed debounce timer. Dropping the closure after `clearTimeout`
/// releases the callback it holds.
struct DebounceState {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

/// Install (or replace) the injected persistence service
pub fn set_service(service: js_sys::Object) {
    SERVICE.with(|slot| *slot.borrow_mut() = Some(service));
}

pub fn has_service() -> bool {
    SERVICE.with(|slot| slot.borrow().is_some())
}

/// Re-arm the debounce timer; the previous pending save (if any) is
/// cancelled so only the final edit in a burst hits the store.
pub fn schedule_save(delay_ms: i32) {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };

    cancel_pending();

    let closure = Closure::wrap(Box::new(move || {
        DEBOUNCE.with(|slot| slot.borrow_mut().take());
        flush_now();
    }) as Box<dyn FnMut()>);

    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms,
    ) {
        Ok(handle) => {
            DEBOUNCE.with(|slot| {
                *slot.borrow_mut() = Some(DebounceState {
                    handle,
                    _closure: closure,
                })
            });
        }
        Err(err) => {
            log::error!("failed to arm save timer: {:?}", err);
        }
    }
}

/// Cancel a pending debounced save without flushing it
pub fn cancel_pending() {
    if let Some(prev) = DEBOUNCE.with(|slot| slot.borrow_mut().take()) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(prev.handle);
        }
    }
}

/// Save the current notebook immediately (explicit save, or the debounce
/// timer firing). Fire-and-forget: failures are logged, never thrown.
pub fn flush_now() {
    cancel_pending();
    let snapshot = match state::snapshot() {
        Some(nb) => nb,
        None => return,
    };
    spawn_local(async move {
        if let Err(err) = save_notebook(snapshot).await {
            log::error!("notebook save failed: {:?}", err);
        }
    });
}

/// First save creates the document and records the id the store assigned;
/// every later save replaces the cell array in place.
async fn save_notebook(notebook: Notebook) -> Result<(), JsValue> {
    let service = SERVICE
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| JsValue::from_str("no persistence service installed"))?;

    let payload = serde_wasm_bindgen::to_value(&notebook)
        .map_err(|err| JsValue::from_str(&format!("failed to serialize notebook: {}", err)))?;

    match &notebook.id {
        Some(id) => {
            let result = call_service(&service, "updateNotebook", &[&JsValue::from_str(id), &payload])?;
            await_if_promise(result).await?;
            log::debug!("notebook {} saved", id);
        }
        None => {
            let result = call_service(&service, "createNotebook", &[&payload])?;
            let resolved = await_if_promise(result).await?;
            if let Some(new_id) = extract_id(&resolved) {
                log::info!("notebook created with id {}", new_id);
                let _ = state::with_notebook_mut(|nb| nb.id = Some(new_id.clone()));
            } else {
                log::warn!("createNotebook resolved without an id");
            }
        }
    }
    Ok(())
}

/// Ask the store to delete a notebook. Fire-and-forget, like the saves.
pub fn delete_notebook(id: &str) {
    let id = id.to_string();
    spawn_local(async move {
        let service = match SERVICE.with(|slot| slot.borrow().clone()) {
            Some(s) => s,
            None => {
                log::warn!("deleteNotebook skipped: no persistence service installed");
                return;
            }
        };
        let result = call_service(&service, "deleteNotebook", &[&JsValue::from_str(&id)])
            .map(await_if_promise);
        match result {
            Ok(pending) => {
                if let Err(err) = pending.await {
                    log::error!("notebook delete failed: {:?}", err);
                }
            }
            Err(err) => log::error!("notebook delete failed: {:?}", err),
        }
    });
}

fn call_service(
    service: &js_sys::Object,
    method: &str,
    args: &[&JsValue],
) -> Result<JsValue, JsValue> {
    let func: js_sys::Function = js_sys::Reflect::get(service, &JsValue::from_str(method))
        .ok()
        .and_then(|f| f.dyn_into().ok())
        .ok_or_else(|| {
            JsValue::from_str(&format!("persistence service has no '{}' method", method))
        })?;
    match args {
        [a] => func.call1(service, a),
        [a, b] => func.call2(service, a, b),
        _ => func.apply(service, &js_sys::Array::from_iter(args.iter().copied())),
    }
}

async fn await_if_promise(value: JsValue) -> Result<JsValue, JsValue> {
    if value.is_instance_of::<js_sys::Promise>() {
        JsFuture::from(js_sys::Promise::from(value)).await
    } else {
        Ok(value)
    }
}

/// The store may resolve a create with the id itself or with a document
/// object carrying an `id` field.
fn extract_id(value: &JsValue) -> Option<String> {
    if let Some(id) = value.as_string() {
        return Some(id);
    }
    js_sys::Reflect::get(value, &JsValue::from_str("id"))
        .ok()
        .and_then(|v| v.as_string())
}
