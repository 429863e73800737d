// src/formatting/rich_document/config.rs
//! Everything the rich-document renderer is parameterized by.

use crate::constants::*;

/// Size caps applied by the rich-document renderer, each independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RichDocumentLimits {
    pub paragraph_max_chars: usize,
    pub max_paragraphs: usize,
    pub task_item_max_chars: usize,
    pub max_task_items: usize,
    pub max_images: usize,
    pub max_files: usize,
    pub max_links: usize,
    pub link_text_max_chars: usize,
}

impl Default for RichDocumentLimits {
    fn default() -> Self {
        Self {
            paragraph_max_chars: DESCRIPTION_PARAGRAPH_MAX_CHARS,
            max_paragraphs: DESCRIPTION_MAX_PARAGRAPHS,
            task_item_max_chars: TASK_ITEM_MAX_CHARS,
            max_task_items: TASK_LIST_MAX_ITEMS,
            max_images: IMAGE_SECTION_MAX_ITEMS,
            max_files: FILE_SECTION_MAX_ITEMS,
            max_links: LINK_SECTION_MAX_ITEMS,
            link_text_max_chars: LINK_TEXT_MAX_CHARS,
        }
    }
}

/// Tracker-facing headings, prefixes and metadata labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLabels {
    pub description: String,
    pub checklist: String,
    pub images: String,
    pub files: String,
    pub links: String,
    pub metadata: String,
    pub image_prefix: String,
    pub file_prefix: String,
    pub link_prefix: String,
    pub file_fallback: String,
    pub status: String,
    pub priority: String,
    pub effort: String,
    pub due_date: String,
    pub tags: String,
    pub source_link: String,
    pub updated: String,
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self {
            description: "Описание задачи".to_string(),
            checklist: "Чеклист".to_string(),
            images: "Изображения".to_string(),
            files: "Файлы".to_string(),
            links: "Ссылки".to_string(),
            metadata: "Метаданные".to_string(),
            image_prefix: "📷 ".to_string(),
            file_prefix: "📎 ".to_string(),
            link_prefix: "🔗 ".to_string(),
            file_fallback: "Файл".to_string(),
            status: "Статус в Notion".to_string(),
            priority: "Приоритет".to_string(),
            effort: "Уровень усилий".to_string(),
            due_date: "Срок".to_string(),
            tags: "Теги".to_string(),
            source_link: "Оригинал в Notion".to_string(),
            updated: "Обновлено".to_string(),
        }
    }
}

/// Source property names read for the metadata section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataProperties {
    pub status: String,
    pub priority: String,
    pub effort: String,
    pub due_date: String,
    pub tags: String,
}

impl Default for MetadataProperties {
    fn default() -> Self {
        Self {
            status: "Status".to_string(),
            priority: "Priority".to_string(),
            effort: "Effort level".to_string(),
            due_date: "Due date".to_string(),
            tags: "Task type".to_string(),
        }
    }
}

impl MetadataProperties {
    /// (label, property name) pairs in emission order.
    pub(super) fn labelled<'a>(&'a self, labels: &'a SectionLabels) -> [(&'a str, &'a str); 5] {
        [
            (labels.status.as_str(), self.status.as_str()),
            (labels.priority.as_str(), self.priority.as_str()),
            (labels.effort.as_str(), self.effort.as_str()),
            (labels.due_date.as_str(), self.due_date.as_str()),
            (labels.tags.as_str(), self.tags.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichDocumentConfig {
    pub limits: RichDocumentLimits,
    pub labels: SectionLabels,
    pub metadata: MetadataProperties,
}
