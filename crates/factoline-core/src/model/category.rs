// ── Filter configuration ──

use serde::{Deserialize, Serialize};

/// One checkbox in a filter group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub id: String,
    pub label: String,
    /// Display-only product count; hidden when absent or zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl FilterOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            count: None,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// The count to render next to the label, if any.
    pub fn display_count(&self) -> Option<u32> {
        self.count.filter(|&c| c != 0)
    }
}

/// A named group of independent options (essence, type, thickness, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCategory {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

impl FilterCategory {
    pub fn new(id: impl Into<String>, title: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            options,
        }
    }
}
