//! Data models for todos and categories.
//!
//! Both record shapes embed a [`RecordMeta`] carrying the store-assigned ID
//! and the created/updated/deleted timestamps. Parent links are plain IDs
//! where `0` means "no parent"; the store does not enforce that a parent
//! exists, and cycles are not prevented.
//!
//! `Display` renders the compact JSON form of a record, which is what the
//! logging middleware writes.
//!
//! # Examples
//!
//! ```rust
//! use todo_core::models::Todo;
//!
//! let todo: Todo = serde_json::from_str(r#"{"title":"buy milk","star":2}"#).unwrap();
//! assert_eq!(todo.title, "buy milk");
//! assert_eq!(todo.star, 2);
//! assert_eq!(todo.id(), 0);
//! assert!(!todo.complete);
//! ```

pub mod category;
pub mod meta;
pub mod todo;


pub use category::Category;
pub use meta::{RecordKind, RecordMeta};
pub use todo::Todo;
