//! Compilation Adapter
//!
//! Turns cell source into plain, script-mode JavaScript via the loaded
//! toolchain. Each call is an independent request/response transform; the
//! adapter never throws; every failure comes back as a `CompileResult`
//! with `success: false`.

pub mod adapter;
pub mod rewrite;

pub use adapter::{compile_react, compile_typescript};
pub use rewrite::rewrite_exports;
