//! Compiler toolchain integration
//!
//! The notebook compiles TypeScript and JSX in the browser through the
//! Babel standalone bundle. This module owns the two halves of that
//! integration: lazily getting the bundle onto the page (`loader`) and
//! describing how it is invoked per language (`presets`).

pub mod loader;
pub mod presets;
