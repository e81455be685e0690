//! Textual `export` rewriting
//!
//! The compiled artifact is executed as a script, not a module, so module
//! syntax has to go before the toolchain ever sees the source. `export
//! default X` becomes an assignment to the well-known `exportedComponent`
//! slot the component-discovery step looks for; any other `export` prefix
//! is replaced with `const`. This is a deliberate line-prefix replace, not
//! a parse; ambiguous or multiple exports are not specially handled.

/// Well-known binding the `export default` rewrite assigns to.
pub const EXPORT_SLOT: &str = "exportedComponent";

pub fn rewrite_exports(source: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in source.lines() {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];
        if let Some(rest) = trimmed.strip_prefix("export default ") {
            out.push(format!("{}const {} = {}", indent, EXPORT_SLOT, rest));
        } else if let Some(rest) = trimmed.strip_prefix("export ") {
            out.push(format!("{}const {}", indent, rest));
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}
