//! Operation layer: one method per use case.
//!
//! [`TodoService`] is the seam every layer above talks to. The concrete
//! [`BasicTodoService`] opens a connection per call; [`Middleware`] wrappers
//! decorate it without changing arguments or results.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Middleware    │    │   Operations    │    │    Database     │
//! │   (logging,     │───▶│ (todo_ops,      │───▶│   (via db/)     │
//! │    ...)         │    │  category_ops)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use todo_core::{models::Todo, service::logging_middleware, TodoServiceBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TodoServiceBuilder::new()
//!     .with_database_path(Some("todo.db"))
//!     .with_middleware(logging_middleware())
//!     .build()
//!     .await?;
//!
//! let todo = service.add(Todo::new("buy milk")).await?;
//! service.set_star(todo.id(), 3).await?;
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Category, Todo},
};

pub mod basic;
pub mod builder;
pub mod category_ops;
pub mod logging;
pub mod todo_ops;


pub use basic::BasicTodoService;
pub use builder::TodoServiceBuilder;
pub use logging::{logging_middleware, LoggingMiddleware};
pub use todo_ops::{validate_star, MAX_STAR};

/// Every todo and category use case.
///
/// Dropping a returned future abandons the call; there is no other
/// cancellation handle.
#[async_trait]
pub trait TodoService: Send + Sync {
    /// Lists all live todos.
    async fn get(&self) -> Result<Vec<Todo>>;

    /// Creates a todo as given.
    async fn add(&self, todo: Todo) -> Result<Todo>;

    /// Marks a todo complete.
    async fn set_complete(&self, id: u64) -> Result<()>;

    /// Clears a todo's completion flag.
    async fn remove_complete(&self, id: u64) -> Result<()>;

    /// Soft-deletes a todo.
    async fn delete(&self, id: u64) -> Result<()>;

    /// Overwrites a todo with the given fields.
    async fn update(&self, todo: Todo) -> Result<Todo>;

    /// Sets a todo's star rating, rejecting values outside `0..=5`.
    async fn set_star(&self, id: u64, star: i64) -> Result<()>;

    /// Creates `todo` as a child of `parent_id`.
    async fn reply_to(&self, parent_id: u64, todo: Todo) -> Result<Todo>;

    /// Lists the live todos whose parent is `id`.
    async fn get_childes(&self, id: u64) -> Result<Vec<Todo>>;

    async fn add_category(&self, category: Category) -> Result<Category>;

    async fn get_category(&self) -> Result<Vec<Category>>;

    async fn update_category(&self, category: Category) -> Result<Category>;

    async fn delete_category(&self, id: u64) -> Result<()>;

    /// Lists the live categories whose parent is `id`.
    async fn get_cat_childes(&self, id: u64) -> Result<Vec<Category>>;
}

/// Wraps a service and returns the decorated one.
pub type Middleware = Box<dyn Fn(Arc<dyn TodoService>) -> Arc<dyn TodoService> + Send + Sync>;

/// Applies `middleware` in order, so the last entry ends up outermost.
pub fn wrap(
    service: Arc<dyn TodoService>,
    middleware: impl IntoIterator<Item = Middleware>,
) -> Arc<dyn TodoService> {
    middleware.into_iter().fold(service, |svc, m| m(svc))
}

/// Builds a [`BasicTodoService`] on `db_path` with `middleware` wired in.
pub fn new(
    db_path: impl Into<PathBuf>,
    middleware: impl IntoIterator<Item = Middleware>,
) -> Arc<dyn TodoService> {
    wrap(Arc::new(BasicTodoService::new(db_path)), middleware)
}
