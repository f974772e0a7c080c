//! Request mediation between transports and the operation layer.
//!
//! Each [`Endpoints`] method takes one request shape from [`crate::params`],
//! calls the matching [`TodoService`] operation, and returns a [`Response`]
//! envelope. Failures travel inside the envelope as data; transports ask
//! [`Failer::failed`] to decide how to encode.
//!
//! ```text
//! Transport → Endpoints → TodoService (+ middleware) → Database
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use todo_core::{endpoint::{Endpoints, Failer}, params::SetStarRequest, TodoServiceBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoints = Endpoints::new(TodoServiceBuilder::new().build().await?);
//! let response = endpoints.set_star(SetStarRequest { id: 1, star: 7 }).await;
//! if let Some(err) = response.failed() {
//!     eprintln!("{err}");
//! }
//! # Ok(())
//! # }
//! ```

use std::{collections::HashMap, future::Future, sync::Arc};

use async_trait::async_trait;

use crate::{
    error::{Result, TodoError},
    models::{Category, Todo},
    params::{
        AddCategoryRequest, AddRequest, DeleteCategoryRequest, DeleteRequest,
        GetCatChildesRequest, GetCategoryRequest, GetChildesRequest, GetRequest,
        RemoveCompleteRequest, ReplyToRequest, SetCompleteRequest, SetStarRequest,
        UpdateCategoryRequest, UpdateRequest,
    },
    service::TodoService,
};

/// Outcome of one mediated call.
#[derive(Debug)]
pub enum Response<T> {
    Success(T),
    Failure(TodoError),
}

/// Implemented by response types that may carry a failure.
pub trait Failer {
    /// The failure detail, or `None` when the call succeeded.
    fn failed(&self) -> Option<&TodoError>;
}

impl<T> Failer for Response<T> {
    fn failed(&self) -> Option<&TodoError> {
        match self {
            Response::Success(_) => None,
            Response::Failure(err) => Some(err),
        }
    }
}

impl<T> Response<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Converts the envelope back into an ordinary `Result`.
    pub fn into_result(self) -> Result<T> {
        match self {
            Response::Success(value) => Ok(value),
            Response::Failure(err) => Err(err),
        }
    }
}

impl<T> From<Result<T>> for Response<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Response::Success(value),
            Err(err) => Response::Failure(err),
        }
    }
}

/// Hook around one named operation, such as `"SetStar"`.
///
/// Operation names are the ones the logging middleware prints: `Get`, `Add`,
/// `SetComplete`, `RemoveComplete`, `Delete`, `Update`, `SetStar`, `ReplyTo`,
/// `GetChildes`, `AddCategory`, `GetCategory`, `UpdateCategory`,
/// `DeleteCategory` and `GetCatChildes`.
#[async_trait]
pub trait EndpointMiddleware: Send + Sync {
    /// Runs before the operation. An error skips the operation and becomes
    /// the response.
    async fn before(&self, _operation: &'static str) -> Result<()> {
        Ok(())
    }

    /// Runs after the operation with its failure, if any.
    async fn after(&self, _operation: &'static str, _failure: Option<&TodoError>) {}
}

/// All operations exposed as request/response pairs.
#[derive(Clone)]
pub struct Endpoints {
    service: Arc<dyn TodoService>,
    middleware: HashMap<&'static str, Vec<Arc<dyn EndpointMiddleware>>>,
}

impl Endpoints {
    pub fn new(service: Arc<dyn TodoService>) -> Self {
        Self {
            service,
            middleware: HashMap::new(),
        }
    }

    /// Attaches `middleware` to one operation. Later attachments wrap earlier
    /// ones: they see the call first and the outcome last.
    pub fn with_middleware(
        mut self,
        operation: &'static str,
        middleware: Arc<dyn EndpointMiddleware>,
    ) -> Self {
        self.middleware.entry(operation).or_default().push(middleware);
        self
    }

    pub fn service(&self) -> &Arc<dyn TodoService> {
        &self.service
    }

    /// Runs `call` inside the middleware attached to `operation`.
    async fn run<T, F>(&self, operation: &'static str, call: F) -> Response<T>
    where
        F: Future<Output = Result<T>>,
    {
        let chain = self
            .middleware
            .get(operation)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for middleware in chain.iter().rev() {
            if let Err(err) = middleware.before(operation).await {
                return Response::Failure(err);
            }
        }

        let result = call.await;
        for middleware in chain {
            middleware.after(operation, result.as_ref().err()).await;
        }
        result.into()
    }

    pub async fn get(&self, _req: GetRequest) -> Response<Vec<Todo>> {
        self.run("Get", self.service.get()).await
    }

    pub async fn add(&self, req: AddRequest) -> Response<Todo> {
        self.run("Add", self.service.add(req.todo)).await
    }

    pub async fn set_complete(&self, req: SetCompleteRequest) -> Response<()> {
        self.run("SetComplete", self.service.set_complete(req.id))
            .await
    }

    pub async fn remove_complete(&self, req: RemoveCompleteRequest) -> Response<()> {
        self.run("RemoveComplete", self.service.remove_complete(req.id))
            .await
    }

    pub async fn delete(&self, req: DeleteRequest) -> Response<()> {
        self.run("Delete", self.service.delete(req.id)).await
    }

    pub async fn update(&self, req: UpdateRequest) -> Response<Todo> {
        self.run("Update", self.service.update(req.todo)).await
    }

    pub async fn set_star(&self, req: SetStarRequest) -> Response<()> {
        self.run("SetStar", self.service.set_star(req.id, req.star))
            .await
    }

    pub async fn reply_to(&self, req: ReplyToRequest) -> Response<Todo> {
        self.run("ReplyTo", self.service.reply_to(req.parent_id, req.todo))
            .await
    }

    pub async fn get_childes(&self, req: GetChildesRequest) -> Response<Vec<Todo>> {
        self.run("GetChildes", self.service.get_childes(req.id))
            .await
    }

    pub async fn add_category(&self, req: AddCategoryRequest) -> Response<Category> {
        self.run("AddCategory", self.service.add_category(req.category))
            .await
    }

    pub async fn get_category(&self, _req: GetCategoryRequest) -> Response<Vec<Category>> {
        self.run("GetCategory", self.service.get_category()).await
    }

    pub async fn update_category(&self, req: UpdateCategoryRequest) -> Response<Category> {
        self.run("UpdateCategory", self.service.update_category(req.category))
            .await
    }

    pub async fn delete_category(&self, req: DeleteCategoryRequest) -> Response<()> {
        self.run("DeleteCategory", self.service.delete_category(req.id))
            .await
    }

    pub async fn get_cat_childes(&self, req: GetCatChildesRequest) -> Response<Vec<Category>> {
        self.run("GetCatChildes", self.service.get_cat_childes(req.id))
            .await
    }
}
