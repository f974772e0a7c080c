//! Request structures for todo operations.
//!
//! One plain data shape per operation, free of any transport framework. The
//! HTTP layer decodes bodies straight into these; in-process callers build
//! them by hand.
//!
//! IDs inside request bodies may be JSON numbers or decimal strings, since
//! existing clients send `{"id": "3"}`.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TodoError},
    models::{Category, Todo},
};

/// Parses a decimal record ID such as a path segment.
///
/// # Errors
///
/// Returns `TodoError::InvalidInput` for anything that is not a `u64`.
pub fn parse_id(raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        TodoError::invalid_input("id").with_reason(format!("not a valid ID: {raw:?}"))
    })
}

/// Serde adapter accepting an ID as a number or a numeric string.
pub mod flexible_id {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawId::deserialize(deserializer)? {
            RawId::Number(id) => Ok(id),
            RawId::Text(text) => super::parse_id(&text).map_err(de::Error::custom),
        }
    }
}

/// Parameters for listing todos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetRequest {}

/// Parameters for creating a todo. The body is the todo itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddRequest {
    pub todo: Todo,
}

/// Parameters for marking a todo complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetCompleteRequest {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: u64,
}

/// Parameters for clearing a todo's completion flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveCompleteRequest {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: u64,
}

/// Parameters for soft-deleting a todo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: u64,
}

/// Parameters for overwriting a todo. The body is the todo itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateRequest {
    pub todo: Todo,
}

/// Parameters for rating a todo.
///
/// `star` is signed so that negative ratings reach validation instead of
/// failing to decode. A missing `star` means `0`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetStarRequest {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: u64,
    #[serde(default)]
    pub star: i64,
}

/// Parameters for creating a reply under an existing todo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyToRequest {
    /// Missing means a top-level reply, `0`.
    #[serde(default, deserialize_with = "flexible_id::deserialize")]
    pub parent_id: u64,
    #[serde(default)]
    pub todo: Todo,
}

/// Parameters for listing a todo's replies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetChildesRequest {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: u64,
}

/// Parameters for creating a category. The body is the category itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddCategoryRequest {
    pub category: Category,
}

/// Parameters for listing categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetCategoryRequest {}

/// Parameters for overwriting a category. The body is the category itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateCategoryRequest {
    pub category: Category,
}

/// Parameters for soft-deleting a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteCategoryRequest {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: u64,
}

/// Parameters for listing a category's children.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetCatChildesRequest {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: u64,
}
