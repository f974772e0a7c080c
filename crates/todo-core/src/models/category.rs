//! Category model definition.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RecordMeta;

/// A label for todos, optionally nested under a parent category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Category {
    pub name: String,

    /// Parent category, `0` for a top-level category
    pub parent_id: u64,

    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl Category {
    /// Creates an unsaved category with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> u64 {
        self.meta.id
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("unsupported value type"),
        }
    }
}
