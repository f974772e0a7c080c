//! Core library for the hierarchical todo service.
//!
//! This crate holds everything below the HTTP transport: the record models,
//! the SQLite persistence gateway, the operation layer with its middleware,
//! and the request mediation layer.
//!
//! # Layers
//!
//! - **Models** ([`models`]): `Todo` and `Category` records with parent links
//! - **Persistence** ([`db`]): generic find/create/save/soft-delete over both
//!   tables, one connection per operation
//! - **Operations** ([`service`]): one method per use case behind the
//!   [`TodoService`] trait, decorated by [`service::Middleware`]
//! - **Mediation** ([`endpoint`]): request shapes in, [`endpoint::Response`]
//!   envelopes out
//!
//! # Quick Start
//!
//! ```rust
//! use todo_core::{
//!     endpoint::{Endpoints, Failer},
//!     models::Todo,
//!     params::{AddRequest, SetStarRequest},
//!     TodoServiceBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TodoServiceBuilder::new()
//!     .with_database_path(Some("todo.db"))
//!     .build()
//!     .await?;
//! let endpoints = Endpoints::new(service);
//!
//! let todo = endpoints
//!     .add(AddRequest { todo: Todo::new("buy milk") })
//!     .await
//!     .into_result()?;
//!
//! let response = endpoints
//!     .set_star(SetStarRequest { id: todo.id(), star: 7 })
//!     .await;
//! assert!(response.failed().is_some());
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod params;
pub mod service;

// Re-export commonly used types
pub use db::Database;
pub use endpoint::{EndpointMiddleware, Endpoints, Failer, Response};
pub use error::{Result, TodoError};
pub use models::{Category, RecordKind, RecordMeta, Todo};
pub use service::{TodoService, TodoServiceBuilder};
