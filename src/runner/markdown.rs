//! Markdown narration
//!
//! Markdown cells do not execute code. The run instead classifies the
//! source line by line to produce a human-readable transcript for the log.
//! This is informational narration only; the separately rendered live
//! preview does real Markdown rendering and is not affected by this pass.

/// Classification of one markdown source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownLine {
    /// `#`, `##`, `###` headings (levels 1-3)
    Heading(u8, String),
    /// `-` or `*` bullet item
    Bullet(String),
    /// ``` fence marker
    FenceMarker,
    Blank,
    Paragraph(String),
}

pub fn classify_line(line: &str) -> MarkdownLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return MarkdownLine::Blank;
    }
    if let Some(rest) = trimmed.strip_prefix("### ") {
        return MarkdownLine::Heading(3, rest.to_string());
    }
    if let Some(rest) = trimmed.strip_prefix("## ") {
        return MarkdownLine::Heading(2, rest.to_string());
    }
    if let Some(rest) = trimmed.strip_prefix("# ") {
        return MarkdownLine::Heading(1, rest.to_string());
    }
    if trimmed.starts_with("```") {
        return MarkdownLine::FenceMarker;
    }
    if let Some(rest) = trimmed.strip_prefix("- ") {
        return MarkdownLine::Bullet(rest.to_string());
    }
    if let Some(rest) = trimmed.strip_prefix("* ") {
        return MarkdownLine::Bullet(rest.to_string());
    }
    MarkdownLine::Paragraph(trimmed.to_string())
}

/// Produce the narration transcript for a markdown cell
pub fn narrate(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| match classify_line(line) {
            MarkdownLine::Heading(level, text) => Some(format!("Heading {}: {}", level, text)),
            MarkdownLine::Bullet(text) => Some(format!("Bullet: {}", text)),
            MarkdownLine::FenceMarker => Some("Code fence".to_string()),
            MarkdownLine::Blank => None,
            MarkdownLine::Paragraph(text) => Some(format!("Paragraph: {}", text)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_heading_levels_deepest_first() {
        assert_eq!(classify_line("# One"), MarkdownLine::Heading(1, "One".into()));
        assert_eq!(classify_line("## Two"), MarkdownLine::Heading(2, "Two".into()));
        assert_eq!(classify_line("### Three"), MarkdownLine::Heading(3, "Three".into()));
        // Level 4+ is not a recognized heading
        assert_eq!(
            classify_line("#### Four"),
            MarkdownLine::Paragraph("#### Four".into())
        );
    }

    #[test]
    fn classifies_bullets_and_fences() {
        assert_eq!(classify_line("- item"), MarkdownLine::Bullet("item".into()));
        assert_eq!(classify_line("* item"), MarkdownLine::Bullet("item".into()));
        assert_eq!(classify_line("```js"), MarkdownLine::FenceMarker);
    }

    #[test]
    fn narration_skips_blank_lines() {
        let lines = narrate("# Title\n\nsome text\n- a\n");
        assert_eq!(
            lines,
            vec![
                "Heading 1: Title".to_string(),
                "Paragraph: some text".to_string(),
                "Bullet: a".to_string(),
            ]
        );
    }
}
