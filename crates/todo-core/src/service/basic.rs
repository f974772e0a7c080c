//! Stateless [`TodoService`] backed by a SQLite file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task;

use super::{category_ops, todo_ops, TodoService};
use crate::{
    db::Database,
    error::{Result, TodoError},
    models::{Category, Todo},
};

/// Opens a fresh connection for every call and releases it when the call
/// returns.
#[derive(Debug, Clone)]
pub struct BasicTodoService {
    db_path: PathBuf,
}

impl BasicTodoService {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` on the blocking pool with a connection scoped to the call.
    async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            op(&db)
        })
        .await
        .map_err(TodoError::join)?
    }
}

#[async_trait]
impl TodoService for BasicTodoService {
    async fn get(&self) -> Result<Vec<Todo>> {
        self.with_database(todo_ops::get).await
    }

    async fn add(&self, todo: Todo) -> Result<Todo> {
        self.with_database(move |db| todo_ops::add(db, todo)).await
    }

    async fn set_complete(&self, id: u64) -> Result<()> {
        self.with_database(move |db| todo_ops::set_complete(db, id, true))
            .await
    }

    async fn remove_complete(&self, id: u64) -> Result<()> {
        self.with_database(move |db| todo_ops::set_complete(db, id, false))
            .await
    }

    async fn delete(&self, id: u64) -> Result<()> {
        self.with_database(move |db| todo_ops::delete(db, id)).await
    }

    async fn update(&self, todo: Todo) -> Result<Todo> {
        self.with_database(move |db| todo_ops::update(db, todo)).await
    }

    async fn set_star(&self, id: u64, star: i64) -> Result<()> {
        self.with_database(move |db| todo_ops::set_star(db, id, star))
            .await
    }

    async fn reply_to(&self, parent_id: u64, todo: Todo) -> Result<Todo> {
        self.with_database(move |db| todo_ops::reply_to(db, parent_id, todo))
            .await
    }

    async fn get_childes(&self, id: u64) -> Result<Vec<Todo>> {
        self.with_database(move |db| todo_ops::get_childes(db, id))
            .await
    }

    async fn add_category(&self, category: Category) -> Result<Category> {
        self.with_database(move |db| category_ops::add(db, category))
            .await
    }

    async fn get_category(&self) -> Result<Vec<Category>> {
        self.with_database(category_ops::get).await
    }

    async fn update_category(&self, category: Category) -> Result<Category> {
        self.with_database(move |db| category_ops::update(db, category))
            .await
    }

    async fn delete_category(&self, id: u64) -> Result<()> {
        self.with_database(move |db| category_ops::delete(db, id))
            .await
    }

    async fn get_cat_childes(&self, id: u64) -> Result<Vec<Category>> {
        self.with_database(move |db| category_ops::get_childes(db, id))
            .await
    }
}
