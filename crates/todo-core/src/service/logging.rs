//! Logging decorator for any [`TodoService`].

use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;

use super::{Middleware, TodoService};
use crate::{
    error::Result,
    models::{Category, Todo},
};

/// Logs each call's method, arguments, result and error, then hands the
/// result back untouched.
pub struct LoggingMiddleware {
    next: Arc<dyn TodoService>,
}

impl LoggingMiddleware {
    pub fn new(next: Arc<dyn TodoService>) -> Self {
        Self { next }
    }
}

/// [`LoggingMiddleware`] packaged for [`super::wrap`].
pub fn logging_middleware() -> Middleware {
    Box::new(|next: Arc<dyn TodoService>| -> Arc<dyn TodoService> {
        Arc::new(LoggingMiddleware::new(next))
    })
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "unsupported value type".to_string())
}

/// `fields` is either empty or a run of ` key=value` pairs.
async fn logged<T, F>(method: &str, fields: String, call: F) -> Result<T>
where
    T: Serialize,
    F: Future<Output = Result<T>>,
{
    debug!("method={method}{fields} calling");

    let result = call.await;
    match &result {
        Ok(value) => info!("method={method}{fields} t={} error=null", to_json(value)),
        Err(e) => info!("method={method}{fields} error=\"{e}\""),
    }
    result
}

#[async_trait]
impl TodoService for LoggingMiddleware {
    async fn get(&self) -> Result<Vec<Todo>> {
        logged("Get", String::new(), self.next.get()).await
    }

    async fn add(&self, todo: Todo) -> Result<Todo> {
        logged("Add", format!(" todo={todo}"), self.next.add(todo)).await
    }

    async fn set_complete(&self, id: u64) -> Result<()> {
        logged("SetComplete", format!(" id={id}"), self.next.set_complete(id)).await
    }

    async fn remove_complete(&self, id: u64) -> Result<()> {
        logged("RemoveComplete", format!(" id={id}"), self.next.remove_complete(id)).await
    }

    async fn delete(&self, id: u64) -> Result<()> {
        logged("Delete", format!(" id={id}"), self.next.delete(id)).await
    }

    async fn update(&self, todo: Todo) -> Result<Todo> {
        logged("Update", format!(" todo={todo}"), self.next.update(todo)).await
    }

    async fn set_star(&self, id: u64, star: i64) -> Result<()> {
        logged(
            "SetStar",
            format!(" id={id} star={star}"),
            self.next.set_star(id, star),
        )
        .await
    }

    async fn reply_to(&self, parent_id: u64, todo: Todo) -> Result<Todo> {
        logged(
            "ReplyTo",
            format!(" parentId={parent_id} todo={todo}"),
            self.next.reply_to(parent_id, todo),
        )
        .await
    }

    async fn get_childes(&self, id: u64) -> Result<Vec<Todo>> {
        logged("GetChildes", format!(" id={id}"), self.next.get_childes(id)).await
    }

    async fn add_category(&self, category: Category) -> Result<Category> {
        logged(
            "AddCategory",
            format!(" category={category}"),
            self.next.add_category(category),
        )
        .await
    }

    async fn get_category(&self) -> Result<Vec<Category>> {
        logged("GetCategory", String::new(), self.next.get_category()).await
    }

    async fn update_category(&self, category: Category) -> Result<Category> {
        logged(
            "UpdateCategory",
            format!(" category={category}"),
            self.next.update_category(category),
        )
        .await
    }

    async fn delete_category(&self, id: u64) -> Result<()> {
        logged("DeleteCategory", format!(" id={id}"), self.next.delete_category(id)).await
    }

    async fn get_cat_childes(&self, id: u64) -> Result<Vec<Category>> {
        logged("GetCatChildes", format!(" id={id}"), self.next.get_cat_childes(id)).await
    }
}
