//! Todo model definition.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RecordMeta;

/// A task, optionally tagged with a category and optionally nested under a
/// parent todo as a reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Todo {
    /// Short label
    pub title: String,

    /// Free text
    pub description: String,

    /// Owning category, `0` when uncategorized
    pub category_id: u64,

    /// Rating in `0..=5`
    pub star: u8,

    /// Completion flag
    pub complete: bool,

    /// Parent todo, `0` for a top-level todo
    pub parent_id: u64,

    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl Todo {
    /// Creates an unsaved todo with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> u64 {
        self.meta.id
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("unsupported value type"),
        }
    }
}
