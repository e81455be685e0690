//! Run pipeline
//!
//! One call to [`run`] takes a cell through Compile → Execute → Render →
//! Settle. Phases are strictly ordered within a run; runs for different
//! cells interleave freely on the event loop. The compiled body executes
//! synchronously and cannot be interrupted: an infinite loop in cell code
//! hangs the page; there is no watchdog.

use wasm_bindgen::{JsCast, JsValue};

use crate::compile;
use crate::errors::ExecutionError;
use crate::models::{CellLanguage, CellType};
use crate::runner::console::CapturedConsole;
use crate::runner::discovery::{self, Discovery, GlobalScope, DISCOVERY_EPILOGUE};
use crate::runner::log::ExecutionLog;
use crate::runner::markdown;
use crate::runner::mount;
use crate::utils::js_value;
use crate::utils::timing::Timer;

/// Terminal record of one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Accumulated transcript (phase lines + captured console)
    pub output: String,
    /// Set when the run settled in the error state
    pub error: Option<String>,
    /// Elapsed milliseconds
    pub execution_time: f64,
}

/// Run one cell. Never panics and never propagates an exception: every
/// failure settles as `error` plus whatever log accumulated before the
/// failure point.
pub async fn run(
    cell_id: &str,
    cell_type: CellType,
    language: CellLanguage,
    content: &str,
) -> RunOutcome {
    let timer = Timer::start();
    let mut log = ExecutionLog::new();

    let result = match cell_type {
        CellType::Markdown => run_markdown(content, &mut log),
        CellType::Code => match language {
            CellLanguage::Javascript => run_javascript(content, &mut log),
            CellLanguage::Typescript => run_typescript(content, &mut log).await,
            CellLanguage::React | CellLanguage::ReactTs => {
                run_react(
                    cell_id,
                    content,
                    language == CellLanguage::ReactTs,
                    &mut log,
                )
                .await
            }
        },
    };

    let execution_time = timer.elapsed_ms();
    match result {
        Ok(()) => RunOutcome {
            output: log.into_output(),
            error: None,
            execution_time,
        },
        Err(err) => RunOutcome {
            output: log.into_output(),
            error: Some(err.to_string()),
            execution_time,
        },
    }
}

/// Markdown cells narrate instead of executing
fn run_markdown(content: &str, log: &mut ExecutionLog) -> Result<(), ExecutionError> {
    log.push("Rendering markdown cell");
    log.extend(markdown::narrate(content));
    Ok(())
}

fn run_javascript(content: &str, log: &mut ExecutionLog) -> Result<(), ExecutionError> {
    log.push("Executing JavaScript cell");
    execute_script(content, log)
}

/// TypeScript: compile failure is soft. Fall back to the raw source,
/// which throws at execution time if it used TypeScript-only syntax.
async fn run_typescript(content: &str, log: &mut ExecutionLog) -> Result<(), ExecutionError> {
    log.push("Compiling TypeScript cell");
    let compiled = compile::compile_typescript(content).await;
    let source = if compiled.success {
        log.push("Executing compiled output");
        compiled.code
    } else {
        let reason = compiled.error.unwrap_or_else(|| "unknown error".to_string());
        log.push(format!("Warning: TypeScript compilation failed: {}", reason));
        log.push("Executing original source as plain JavaScript");
        content.to_string()
    };
    execute_script(&source, log)
}

/// React: compile failure is a hard stop. JSX cannot run unmodified, so
/// the source is never executed uncompiled.
async fn run_react(
    cell_id: &str,
    content: &str,
    is_typescript: bool,
    log: &mut ExecutionLog,
) -> Result<(), ExecutionError> {
    log.push("Compiling React component");
    let compiled = compile::compile_react(content, is_typescript).await;
    if !compiled.success {
        let reason = compiled.error.unwrap_or_else(|| "unknown error".to_string());
        return Err(ExecutionError::Compile(reason));
    }

    log.push("Executing component definition");
    match execute_and_render(cell_id, &compiled.code, log) {
        Ok(()) => Ok(()),
        Err(err) => {
            // Never leave the preview blank: the failure goes into the
            // mount node as well as the cell's error field.
            mount::write_error_panel(cell_id, &err.to_string());
            Err(err)
        }
    }
}

/// Execute plain (non-UI) source with a capturing console
fn execute_script(source: &str, log: &mut ExecutionLog) -> Result<(), ExecutionError> {
    let console = CapturedConsole::new();
    let func = construct_cell_function(&["console"], source)?;
    let result = func
        .call1(&JsValue::NULL, console.object())
        .map(|_| ())
        .map_err(|err| ExecutionError::Runtime(js_value::error_message(&err)));
    // Flush whatever the cell printed before a possible throw
    log.extend(console.lines());
    result
}

/// Execute compiled UI source once, discover the component, mount it
fn execute_and_render(
    cell_id: &str,
    compiled: &str,
    log: &mut ExecutionLog,
) -> Result<(), ExecutionError> {
    let react = mount::react_global()?;
    let console = CapturedConsole::new();

    // Single execution: the epilogue makes the return value the component
    let body = format!("{}{}", compiled, DISCOVERY_EPILOGUE);
    let func = construct_cell_function(&["console", "React"], &body)?;
    let returned = func
        .call2(&JsValue::NULL, console.object(), &react)
        .map_err(|err| ExecutionError::Runtime(js_value::error_message(&err)));
    log.extend(console.lines());
    let returned = returned?;

    let component = locate_component(returned, log);
    let component = match component {
        Some(c) => c,
        None => {
            log.push("No component found, rendering placeholder");
            mount::fallback_component(&react)
        }
    };

    log.push("Rendering component preview");
    let element = mount::create_element(&react, &component)?;
    mount::mount(&element, cell_id)?;
    Ok(())
}

/// Resolve the mounted component: the execution's return value first
/// (export slot / `App`, resolved in-scope), then the global-scan shim.
fn locate_component(returned: JsValue, log: &mut ExecutionLog) -> Option<JsValue> {
    if returned.is_instance_of::<js_sys::Function>() {
        return Some(returned);
    }
    let scope = GlobalScope::new()?;
    match discovery::discover(&scope) {
        Discovery::NotFound => None,
        found => {
            if let Discovery::Scanned(ref name) = found {
                log.push(format!("Using component '{}' from page scope", name));
            }
            scope.resolve(&found)
        }
    }
}

/// Build a function from cell source via the page's `Function` constructor.
/// Going through `Reflect::construct` keeps a syntax error in the source a
/// catchable rejection instead of an unhandled throw.
fn construct_cell_function(
    params: &[&str],
    body: &str,
) -> Result<js_sys::Function, ExecutionError> {
    let global = js_sys::global();
    let ctor: js_sys::Function = js_sys::Reflect::get(&global, &JsValue::from_str("Function"))
        .ok()
        .and_then(|f| f.dyn_into().ok())
        .ok_or_else(|| ExecutionError::Runtime("Function constructor unavailable".to_string()))?;

    let args = js_sys::Array::new();
    for param in params {
        args.push(&JsValue::from_str(param));
    }
    args.push(&JsValue::from_str(body));

    js_sys::Reflect::construct(&ctor, &args)
        .map_err(|err| ExecutionError::Runtime(js_value::error_message(&err)))?
        .dyn_into()
        .map_err(|_| ExecutionError::Runtime("constructed cell body is not callable".to_string()))
}
