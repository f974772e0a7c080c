//! HTTP binding for [`Endpoints`].
//!
//! Every route decodes its request from the raw body (or the path), calls one
//! endpoint, and encodes the envelope as JSON. Successful calls answer
//! `{"t": value, "error": null}`; calls that return nothing answer
//! `{"error": null}`. Any failure, including a body that does not decode, is a
//! 500 carrying `{"error": "<message>"}`.

use std::future::Future;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response as HttpResponse},
    routing::{delete, get, post, put},
    Router,
};
use log::{error, info, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, signal};
use todo_core::{
    endpoint::{Endpoints, Failer, Response},
    error::{Result, TodoError},
    params::{
        parse_id, AddCategoryRequest, AddRequest, DeleteCategoryRequest, DeleteRequest,
        GetCatChildesRequest, GetCategoryRequest, GetChildesRequest, GetRequest,
        RemoveCompleteRequest, ReplyToRequest, SetCompleteRequest, SetStarRequest,
        UpdateCategoryRequest, UpdateRequest,
    },
};
use tower_http::cors::{Any, CorsLayer};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Wire shape of every response body.
#[derive(Serialize)]
struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    t: Option<Value>,
    error: Option<String>,
}

/// Builds the router with all routes and CORS applied.
pub fn app(endpoints: Endpoints) -> Router {
    Router::new()
        .route("/", get(get_todos))
        .route("/add", post(add))
        .route("/set-complete", put(set_complete))
        .route("/remove-complete", put(remove_complete))
        .route("/delete/{id}", delete(delete_todo))
        .route("/update", put(update))
        .route("/set-star", put(set_star))
        .route("/reply-to", post(reply_to))
        .route("/get-childes/{id}", get(get_childes))
        .route("/add-category", post(add_category))
        .route("/get-category", get(get_category))
        .route("/update-category", put(update_category))
        .route("/delete-category", delete(delete_category))
        .route("/get-cat-childes", get(get_cat_childes))
        .layer(cors())
        .with_state(endpoints)
}

/// Serves [`app`] on `listener` until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, endpoints: Endpoints) -> std::io::Result<()> {
    axum::serve(listener, app(endpoints))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::CONTENT_LENGTH])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Decodes a JSON body regardless of the declared content type.
fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

fn json_response(status: StatusCode, envelope: &Envelope) -> HttpResponse {
    let body = serde_json::to_string(envelope).unwrap_or_else(|err| {
        format!(r#"{{"error":{}}}"#, Value::String(err.to_string()))
    });
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        body,
    )
        .into_response()
}

fn failure(err: &TodoError) -> HttpResponse {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &Envelope {
            t: None,
            error: Some(err.to_string()),
        },
    )
}

fn encode<T: Serialize>(route: &str, response: Response<T>) -> HttpResponse {
    if let Some(err) = response.failed() {
        error!("{route}: {err}");
        return failure(err);
    }

    let value = response
        .into_result()
        .and_then(|value| serde_json::to_value(value).map_err(TodoError::from));
    match value {
        Ok(value) => json_response(
            StatusCode::OK,
            &Envelope {
                t: Some(value).filter(|v| !v.is_null()),
                error: None,
            },
        ),
        Err(err) => {
            error!("{route}: {err}");
            failure(&err)
        }
    }
}

/// Runs one endpoint call on a decoded request, or reports the decode error.
async fn handle<Req, T, F, Fut>(route: &str, request: Result<Req>, call: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = Response<T>>,
{
    match request {
        Ok(request) => encode(route, call(request).await),
        Err(err) => {
            warn!("{route}: rejected request: {err}");
            failure(&err)
        }
    }
}

/// List routes carry no parameters; whatever body arrives is ignored.
async fn get_todos(State(endpoints): State<Endpoints>) -> HttpResponse {
    handle("/", Ok(GetRequest {}), |req| async move {
        endpoints.get(req).await
    })
    .await
}

async fn add(State(endpoints): State<Endpoints>, body: Bytes) -> HttpResponse {
    handle("/add", decode::<AddRequest>(&body), |req| async move {
        endpoints.add(req).await
    })
    .await
}

async fn set_complete(State(endpoints): State<Endpoints>, body: Bytes) -> HttpResponse {
    handle(
        "/set-complete",
        decode::<SetCompleteRequest>(&body),
        |req| async move { endpoints.set_complete(req).await },
    )
    .await
}

async fn remove_complete(State(endpoints): State<Endpoints>, body: Bytes) -> HttpResponse {
    handle(
        "/remove-complete",
        decode::<RemoveCompleteRequest>(&body),
        |req| async move { endpoints.remove_complete(req).await },
    )
    .await
}

async fn delete_todo(
    State(endpoints): State<Endpoints>,
    Path(id): Path<String>,
) -> HttpResponse {
    let request = parse_id(&id).map(|id| DeleteRequest { id });
    handle("/delete", request, |req| async move {
        endpoints.delete(req).await
    })
    .await
}

async fn update(State(endpoints): State<Endpoints>, body: Bytes) -> HttpResponse {
    handle("/update", decode::<UpdateRequest>(&body), |req| async move {
        endpoints.update(req).await
    })
    .await
}

async fn set_star(State(endpoints): State<Endpoints>, body: Bytes) -> HttpResponse {
    handle("/set-star", decode::<SetStarRequest>(&body), |req| async move {
        endpoints.set_star(req).await
    })
    .await
}

async fn reply_to(State(endpoints): State<Endpoints>, body: Bytes) -> HttpResponse {
    handle("/reply-to", decode::<ReplyToRequest>(&body), |req| async move {
        endpoints.reply_to(req).await
    })
    .await
}

async fn get_childes(
    State(endpoints): State<Endpoints>,
    Path(id): Path<String>,
) -> HttpResponse {
    let request = parse_id(&id).map(|id| GetChildesRequest { id });
    handle("/get-childes", request, |req| async move {
        endpoints.get_childes(req).await
    })
    .await
}

async fn add_category(State(endpoints): State<Endpoints>, body: Bytes) -> HttpResponse {
    handle(
        "/add-category",
        decode::<AddCategoryRequest>(&body),
        |req| async move { endpoints.add_category(req).await },
    )
    .await
}

async fn get_category(State(endpoints): State<Endpoints>) -> HttpResponse {
    handle(
        "/get-category",
        Ok(GetCategoryRequest {}),
        |req| async move { endpoints.get_category(req).await },
    )
    .await
}

async fn update_category(State(endpoints): State<Endpoints>, body: Bytes) -> HttpResponse {
    handle(
        "/update-category",
        decode::<UpdateCategoryRequest>(&body),
        |req| async move { endpoints.update_category(req).await },
    )
    .await
}

async fn delete_category(State(endpoints): State<Endpoints>, body: Bytes) -> HttpResponse {
    handle(
        "/delete-category",
        decode::<DeleteCategoryRequest>(&body),
        |req| async move { endpoints.delete_category(req).await },
    )
    .await
}

async fn get_cat_childes(State(endpoints): State<Endpoints>, body: Bytes) -> HttpResponse {
    handle(
        "/get-cat-childes",
        decode::<GetCatChildesRequest>(&body),
        |req| async move { endpoints.get_cat_childes(req).await },
    )
    .await
}
