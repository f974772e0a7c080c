//! Bookkeeping shared by every stored record.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Identity and lifecycle timestamps embedded in todos and categories.
///
/// Field names on the wire are `ID`, `CreatedAt`, `UpdatedAt` and
/// `DeletedAt`; existing clients depend on them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecordMeta {
    /// Store-assigned identifier, `0` until the record is created
    #[serde(rename = "ID", alias = "id")]
    pub id: u64,

    /// Timestamp when the record was created (UTC)
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<Timestamp>,

    /// Timestamp when the record was last written (UTC)
    #[serde(rename = "UpdatedAt")]
    pub updated_at: Option<Timestamp>,

    /// Soft-delete marker; set records are hidden from every read
    #[serde(rename = "DeletedAt")]
    pub deleted_at: Option<Timestamp>,
}

impl RecordMeta {
    /// Meta for a record that already has an ID but no timestamps.
    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Whether the record carries a soft-delete marker.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// The kinds of record the store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Todo,
    Category,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Todo => "Todo",
            RecordKind::Category => "Category",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
