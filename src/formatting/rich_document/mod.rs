// src/formatting/rich_document/mod.rs
//! Projects a document into the issue tracker's structured description.
//!
//! Sections are emitted in a fixed order: description, checklist, images,
//! files, links, then a rule and the metadata block. Every section applies its
//! own caps from [`RichDocumentLimits`]. Content past a cap is dropped without
//! a marker.

mod config;
mod nodes;

pub use config::{MetadataProperties, RichDocumentConfig, RichDocumentLimits, SectionLabels};
pub use nodes::*;

use super::markdown::render_markdown;
use super::rich_text::{marks_of, InlineMark};
use crate::model::{Block, Document};
use crate::query::{collect_checklist_items, collect_files, collect_images, unique_links};

/// Renders `doc` with the default caps and labels.
pub fn render_rich_document(doc: &Document) -> RichDocument {
    render_rich_document_with(doc, &RichDocumentConfig::default())
}

pub fn render_rich_document_with(doc: &Document, config: &RichDocumentConfig) -> RichDocument {
    let mut content = Vec::new();
    content.extend(description_section(doc, config));
    content.extend(checklist_section(doc, config));
    content.extend(image_section(doc, config));
    content.extend(file_section(doc, config));
    content.extend(link_section(doc, config));
    content.push(RichNode::Rule);
    content.extend(metadata_section(doc, config));
    RichDocument::new(content)
}

/// Heading plus one paragraph per blank-line separated chunk of the markdown.
fn description_section(doc: &Document, config: &RichDocumentConfig) -> Vec<RichNode> {
    let limits = &config.limits;
    let markdown = render_markdown(doc);
    let paragraphs: Vec<&str> = markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    note_dropped("description paragraphs", paragraphs.len(), limits.max_paragraphs);

    let mut nodes = vec![RichNode::heading(2, config.labels.description.as_str())];
    nodes.extend(paragraphs.into_iter().take(limits.max_paragraphs).map(|p| {
        RichNode::paragraph(vec![RichNode::text(truncate_noted(
            p,
            limits.paragraph_max_chars,
            "description paragraph",
        ))])
    }));
    nodes
}

fn checklist_section(doc: &Document, config: &RichDocumentConfig) -> Vec<RichNode> {
    let limits = &config.limits;
    let items = collect_checklist_items(doc);
    if items.is_empty() {
        return Vec::new();
    }
    note_dropped("checklist items", items.len(), limits.max_task_items);

    let task_items = items
        .into_iter()
        .take(limits.max_task_items)
        .enumerate()
        .map(|(index, block)| RichNode::TaskItem {
            attrs: TaskItemAttrs {
                local_id: format!("task-{}", index + 1),
                state: TaskState::from(block.checked().unwrap_or(false)),
            },
            content: inline_nodes(block, limits.task_item_max_chars),
        })
        .collect();

    vec![
        RichNode::heading(2, config.labels.checklist.as_str()),
        RichNode::TaskList {
            attrs: TaskListAttrs {
                local_id: "checklist-1".to_string(),
            },
            content: task_items,
        },
    ]
}

/// Text nodes of a block's runs with their marks, cut to `max_chars` in total.
fn inline_nodes(block: &Block, max_chars: usize) -> Vec<RichNode> {
    let mut remaining = max_chars;
    let mut nodes = Vec::new();
    for run in block.rich_text() {
        if remaining == 0 {
            log::debug!("Checklist item {} cut to {} chars", block.id(), max_chars);
            break;
        }
        let text = truncate_chars(&run.text, remaining);
        if text.is_empty() {
            continue;
        }
        remaining -= text.chars().count();
        let marks = marks_of(run).into_iter().map(to_mark).collect();
        nodes.push(RichNode::marked(text, marks));
    }
    nodes
}

fn to_mark(mark: InlineMark<'_>) -> Mark {
    match mark {
        InlineMark::Bold => Mark::Strong,
        InlineMark::Italic => Mark::Em,
        InlineMark::Strikethrough => Mark::Strike,
        InlineMark::Code => Mark::Code,
        InlineMark::Link(href) => Mark::link(href),
    }
}

fn image_section(doc: &Document, config: &RichDocumentConfig) -> Vec<RichNode> {
    let limits = &config.limits;
    let urls: Vec<&str> = collect_images(doc)
        .into_iter()
        .filter_map(|block| block.file())
        .map(|file| file.url.as_str())
        .collect();
    note_dropped("images", urls.len(), limits.max_images);

    let prefix = config.labels.image_prefix.as_str();
    let paragraphs = urls.into_iter().take(limits.max_images).map(|url| {
        link_paragraph(prefix, &truncate_chars(url, limits.link_text_max_chars), url)
    });
    section(config.labels.images.as_str(), paragraphs)
}

fn file_section(doc: &Document, config: &RichDocumentConfig) -> Vec<RichNode> {
    let limits = &config.limits;
    let files: Vec<_> = collect_files(doc)
        .into_iter()
        .filter_map(|block| block.file())
        .collect();
    note_dropped("files", files.len(), limits.max_files);

    let labels = &config.labels;
    let paragraphs = files.into_iter().take(limits.max_files).map(|file| {
        let name = file
            .display_name
            .as_deref()
            .unwrap_or(labels.file_fallback.as_str());
        link_paragraph(labels.file_prefix.as_str(), name, &file.url)
    });
    section(labels.files.as_str(), paragraphs)
}

fn link_section(doc: &Document, config: &RichDocumentConfig) -> Vec<RichNode> {
    let limits = &config.limits;
    let links = unique_links(doc);
    note_dropped("links", links.len(), limits.max_links);

    let prefix = config.labels.link_prefix.as_str();
    let paragraphs = links.iter().take(limits.max_links).map(|link| {
        link_paragraph(prefix, &truncate_chars(link, limits.link_text_max_chars), link)
    });
    section(config.labels.links.as_str(), paragraphs)
}

/// Heading followed by `paragraphs`, or nothing when there are none.
fn section(heading: &str, paragraphs: impl Iterator<Item = RichNode>) -> Vec<RichNode> {
    let paragraphs: Vec<RichNode> = paragraphs.collect();
    if paragraphs.is_empty() {
        return paragraphs;
    }
    let mut nodes = vec![RichNode::heading(2, heading)];
    nodes.extend(paragraphs);
    nodes
}

fn link_paragraph(prefix: &str, text: &str, href: &str) -> RichNode {
    RichNode::paragraph(vec![
        RichNode::text(prefix),
        RichNode::marked(text, vec![Mark::link(href)]),
    ])
}

fn metadata_section(doc: &Document, config: &RichDocumentConfig) -> Vec<RichNode> {
    let labels = &config.labels;
    let mut nodes = vec![RichNode::heading(3, labels.metadata.as_str())];

    for (label, property) in config.metadata.labelled(labels) {
        let Some(value) = doc.property_value(property).filter(|v| !v.is_blank()) else {
            continue;
        };
        nodes.push(RichNode::paragraph(vec![RichNode::marked(
            format!("{}: {}", label, value),
            vec![Mark::Strong],
        )]));
    }

    let mut source = vec![RichNode::marked(
        format!("{}: ", labels.source_link),
        vec![Mark::Strong],
    )];
    if !doc.url.is_empty() {
        source.push(RichNode::marked(doc.url.as_str(), vec![Mark::link(&doc.url)]));
    }
    nodes.push(RichNode::paragraph(source));

    nodes.push(RichNode::paragraph(vec![RichNode::marked(
        format!(
            "{}: {}",
            labels.updated,
            doc.last_edited_time.format("%Y-%m-%d")
        ),
        vec![Mark::Strong],
    )]));
    nodes
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

fn truncate_noted(text: &str, max_chars: usize, what: &str) -> String {
    let truncated = truncate_chars(text, max_chars);
    if truncated.len() < text.len() {
        log::debug!("Truncated {} to {} chars", what, max_chars);
    }
    truncated
}

fn note_dropped(what: &str, found: usize, cap: usize) {
    if found > cap {
        log::debug!("Dropped {} of {} {} over the cap", found - cap, found, what);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::types::{Annotations, BlockId, PageId, RichTextRun};
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn doc(blocks: Vec<Block>) -> Document {
        Document {
            id: PageId::new("page"),
            created_time: DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z").unwrap(),
            last_edited_time: DateTime::parse_from_rfc3339("2024-03-05T18:30:00+03:00").unwrap(),
            archived: false,
            url: "https://notion.so/page".to_string(),
            icon: None,
            cover: None,
            parent: None,
            properties: Default::default(),
            blocks,
        }
    }

    fn todo(runs: Vec<RichTextRun>, checked: bool) -> Block {
        Block::ToDo(ToDoBlock {
            common: BlockCommon::new(BlockId::new("t")),
            content: TextBlockContent::new(runs),
            checked,
        })
    }

    fn task_list(document: &RichDocument) -> &RichNode {
        document
            .nodes(|n| matches!(n, RichNode::TaskList { .. }))
            .next()
            .expect("task list present")
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("Батуми", 3), "Бат");
        assert_eq!(truncate_chars("ab", 5), "ab");
        assert_eq!(truncate_chars("ab", 0), "");
    }

    #[test]
    fn test_empty_document_has_description_rule_and_metadata() {
        let rendered = render_rich_document(&doc(vec![]));
        let kinds: Vec<String> = rendered
            .content
            .iter()
            .map(|n| match n {
                RichNode::Heading { .. } => format!("h:{}", n.plain_text()),
                RichNode::Rule => "rule".to_string(),
                other => format!("p:{}", other.plain_text()),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "h:Описание задачи",
                "rule",
                "h:Метаданные",
                "p:Оригинал в Notion: https://notion.so/page",
                "p:Обновлено: 2024-03-05",
            ]
        );
    }

    #[test]
    fn test_task_item_keeps_marks_in_order() {
        let run = RichTextRun::plain("x")
            .with_link("https://x")
            .with_annotations(Annotations {
                bold: true,
                ..Default::default()
            });
        let rendered = render_rich_document(&doc(vec![todo(vec![run], true)]));
        let item = &task_list(&rendered).content()[0];
        assert_eq!(
            item.content(),
            &[RichNode::marked(
                "x",
                vec![Mark::Strong, Mark::link("https://x")]
            )]
        );
    }

    #[test]
    fn test_task_item_truncation_spans_runs() {
        let runs = vec![RichTextRun::plain("abc"), RichTextRun::plain("defg")];
        let mut config = RichDocumentConfig::default();
        config.limits.task_item_max_chars = 5;
        let rendered = render_rich_document_with(&doc(vec![todo(runs, false)]), &config);
        let item = &task_list(&rendered).content()[0];
        assert_eq!(item.plain_text(), "abcde");
        assert_eq!(item.content().len(), 2);
    }

    #[test]
    fn test_links_deduplicated_and_capped() {
        let blocks = (0..15)
            .map(|i| {
                Block::Paragraph(TextBlock {
                    common: BlockCommon::new(BlockId::new(format!("p{}", i))),
                    content: TextBlockContent::new(vec![
                        RichTextRun::plain("l").with_link(format!("https://l/{}", i % 12))
                    ]),
                })
            })
            .collect();
        let rendered = render_rich_document(&doc(blocks));
        let link_paragraphs = rendered
            .content
            .iter()
            .filter(|n| n.plain_text().starts_with("🔗 "))
            .count();
        assert_eq!(link_paragraphs, 10);
    }

    #[test]
    fn test_long_link_text_is_cut_but_href_kept() {
        let url = format!("https://img/{}", "x".repeat(300));
        let image = Block::Image(MediaBlock {
            common: BlockCommon::new(BlockId::new("i")),
            file: Some(FileReference::external(url.clone())),
            caption: vec![],
        });
        let rendered = render_rich_document(&doc(vec![image]));
        let paragraph = rendered
            .content
            .iter()
            .find(|n| n.plain_text().starts_with("📷 "))
            .expect("image paragraph");
        match &paragraph.content()[1] {
            RichNode::Text { text, marks } => {
                assert_eq!(text.chars().count(), 200);
                assert_eq!(marks, &vec![Mark::link(url.clone())]);
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    fn file(id: &str, url: &str, name: Option<&str>) -> Block {
        let reference = FileReference::external(url);
        Block::File(MediaBlock {
            common: BlockCommon::new(BlockId::new(id)),
            file: Some(match name {
                Some(name) => reference.with_display_name(name),
                None => reference,
            }),
            caption: vec![],
        })
    }

    #[test]
    fn test_file_section_names_links_and_falls_back() {
        let blocks = vec![
            file("f1", "https://files/plan.pdf", Some("plan.pdf")),
            file("f2", "https://files/raw", None),
        ];
        let rendered = render_rich_document(&doc(blocks));
        let heading = rendered
            .content
            .iter()
            .position(|n| matches!(n, RichNode::Heading { .. }) && n.plain_text() == "Файлы")
            .expect("files heading");

        let named = &rendered.content[heading + 1];
        assert_eq!(
            named.content(),
            &[
                RichNode::text("📎 "),
                RichNode::marked("plan.pdf", vec![Mark::link("https://files/plan.pdf")]),
            ]
        );
        let unnamed = &rendered.content[heading + 2];
        assert_eq!(
            unnamed.content(),
            &[
                RichNode::text("📎 "),
                RichNode::marked("Файл", vec![Mark::link("https://files/raw")]),
            ]
        );
    }

    #[test]
    fn test_file_section_is_capped() {
        let blocks = (0..12)
            .map(|i| file(&format!("f{}", i), &format!("https://files/{}", i), None))
            .collect();
        let count = |document: &RichDocument| {
            document
                .content
                .iter()
                .filter(|n| n.plain_text().starts_with("📎 "))
                .count()
        };
        let document = doc(blocks);
        assert_eq!(count(&render_rich_document(&document)), 10);

        let mut config = RichDocumentConfig::default();
        config.limits.max_files = 2;
        assert_eq!(count(&render_rich_document_with(&document, &config)), 2);
    }
}
