// src/formatting/rich_text/mod.rs
//! Formats rich text runs into Markdown.

mod annotations;

pub use annotations::{marks_of, InlineMark, MarkdownStyleRenderer};

use crate::types::RichTextRun;

/// Formats a run sequence into Markdown, each run carrying its own marks.
pub fn rich_text_to_markdown(runs: &[RichTextRun]) -> String {
    runs.iter().map(run_to_markdown).collect()
}

pub fn run_to_markdown(run: &RichTextRun) -> String {
    MarkdownStyleRenderer::apply_marks(&run.text, &marks_of(run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Annotations;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bold_then_link() {
        let run = RichTextRun::plain("x")
            .with_link("https://x")
            .with_annotations(Annotations {
                bold: true,
                ..Default::default()
            });
        assert_eq!(run_to_markdown(&run), "[**x**](https://x)");
    }

    #[test]
    fn test_runs_concatenate() {
        let runs = vec![
            RichTextRun::plain("Купить "),
            RichTextRun::plain("цветы").with_annotations(Annotations {
                italic: true,
                ..Default::default()
            }),
        ];
        assert_eq!(rich_text_to_markdown(&runs), "Купить *цветы*");
    }
}
