//! Builder for creating and configuring [`TodoService`] instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;
use tokio::task;

use super::{Middleware, TodoService};
use crate::{
    db::Database,
    error::{Result, TodoError},
};

/// Builder for creating and configuring the todo service.
#[derive(Default)]
pub struct TodoServiceBuilder {
    database_path: Option<PathBuf>,
    middleware: Vec<Middleware>,
}

impl TodoServiceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/todo/todo.db` or `~/.local/share/todo/todo.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Appends a middleware; later ones wrap earlier ones.
    pub fn with_middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Builds the configured service.
    ///
    /// Opens the database once so that an unreachable or corrupt store is
    /// reported here rather than on the first request.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::FileSystem` if the database directory cannot be
    /// created.
    /// Returns `TodoError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Arc<dyn TodoService>> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TodoError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TodoError>(())
        })
        .await
        .map_err(TodoError::join)??;

        debug!("Database ready at {}", db_path.display());
        Ok(super::new(db_path, self.middleware))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("todo")
            .place_data_file("todo.db")
            .map_err(|e| TodoError::XdgDirectory(e.to_string()))
    }
}
