// src/formatting/rich_text/annotations.rs
//! Inline mark composition.
//!
//! Both renderers derive a run's marks from here so they agree on the order:
//! bold, italic, strikethrough, code, then link outermost.

use crate::types::RichTextRun;

/// One inline mark carried by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineMark<'a> {
    Bold,
    Italic,
    Strikethrough,
    Code,
    Link(&'a str),
}

/// Marks of a run in application order.
pub fn marks_of(run: &RichTextRun) -> Vec<InlineMark<'_>> {
    let a = run.annotations;
    [
        (a.bold, InlineMark::Bold),
        (a.italic, InlineMark::Italic),
        (a.strikethrough, InlineMark::Strikethrough),
        (a.code, InlineMark::Code),
    ]
    .into_iter()
    .filter_map(|(on, mark)| on.then_some(mark))
    .chain(run.link.as_deref().map(InlineMark::Link))
    .collect()
}

/// Renderer for inline marks to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Wraps `content` once per mark, innermost first.
    ///
    /// Emphasis around empty text would produce stray delimiters, so it is
    /// skipped; a link still renders.
    pub fn apply_marks(content: &str, marks: &[InlineMark<'_>]) -> String {
        let mut result = content.to_string();
        for mark in marks {
            result = match mark {
                InlineMark::Link(url) => format!("[{}]({})", result, url),
                _ if content.is_empty() => continue,
                InlineMark::Bold => format!("**{}**", result),
                InlineMark::Italic => format!("*{}*", result),
                InlineMark::Strikethrough => format!("~~{}~~", result),
                InlineMark::Code => format!("`{}`", result),
            };
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Annotations;

    #[test]
    fn test_marks_follow_fixed_order() {
        let run = RichTextRun::plain("x")
            .with_link("https://x")
            .with_annotations(Annotations {
                bold: true,
                code: true,
                ..Default::default()
            });
        assert_eq!(
            marks_of(&run),
            vec![
                InlineMark::Bold,
                InlineMark::Code,
                InlineMark::Link("https://x")
            ]
        );
    }

    #[test]
    fn test_apply_marks_nests_innermost_first() {
        let marks = [InlineMark::Bold, InlineMark::Italic, InlineMark::Link("https://x")];
        assert_eq!(
            MarkdownStyleRenderer::apply_marks("x", &marks),
            "[***x***](https://x)"
        );
    }

    #[test]
    fn test_empty_text_skips_emphasis() {
        let marks = [InlineMark::Bold, InlineMark::Strikethrough];
        assert_eq!(MarkdownStyleRenderer::apply_marks("", &marks), "");
    }
}
