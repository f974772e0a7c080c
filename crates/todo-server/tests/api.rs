use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use todo_core::{Endpoints, TodoServiceBuilder};
use todo_server::app;
use tower::ServiceExt;

/// Helper function to create a router over a fresh database
async fn test_app() -> (TempDir, Router) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let service = TodoServiceBuilder::new()
        .with_database_path(Some(temp_dir.path().join("api.db")))
        .build()
        .await
        .expect("Failed to create service");
    (temp_dir, app(Endpoints::new(service)))
}

fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn add_todo(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, request("POST", "/add", &body.to_string())).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    json["t"].clone()
}

// --- todos ---

#[tokio::test]
async fn list_todos_empty() {
    let (_temp_dir, app) = test_app().await;

    let (status, json) = send(&app, request("GET", "/", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"t": [], "error": null}));
}

#[tokio::test]
async fn add_returns_created_todo() {
    let (_temp_dir, app) = test_app().await;

    let todo = add_todo(&app, json!({"title": "buy milk", "star": 0})).await;
    assert!(todo["ID"].as_u64().unwrap() > 0);
    assert_eq!(todo["title"], "buy milk");
    assert_eq!(todo["complete"], false);
    assert!(todo["CreatedAt"].is_string());
    assert!(todo["DeletedAt"].is_null());

    let (_, json) = send(&app, request("GET", "/", "")).await;
    assert_eq!(json["t"].as_array().unwrap().len(), 1);
    assert_eq!(json["t"][0]["ID"], todo["ID"]);
}

#[tokio::test]
async fn responses_are_json_with_charset() {
    let (_temp_dir, app) = test_app().await;

    let response = app.clone().oneshot(request("GET", "/", "")).await.unwrap();
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json; charset=utf-8"
    );

    let response = app
        .oneshot(request("PUT", "/set-complete", "{\"id\": 42}"))
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json; charset=utf-8"
    );
}

#[tokio::test]
async fn set_and_remove_complete() {
    let (_temp_dir, app) = test_app().await;
    let todo = add_todo(&app, json!({"title": "finish report"})).await;
    let id = todo["ID"].as_u64().unwrap();

    // Ids arrive as strings from existing clients.
    let body = json!({"id": id.to_string()}).to_string();
    let (status, json) = send(&app, request("PUT", "/set-complete", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"error": null}));

    let (_, json) = send(&app, request("GET", "/", "")).await;
    assert_eq!(json["t"][0]["complete"], true);

    let body = json!({"id": id}).to_string();
    let (status, json) = send(&app, request("PUT", "/remove-complete", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"error": null}));

    let (_, json) = send(&app, request("GET", "/", "")).await;
    assert_eq!(json["t"][0]["complete"], false);
}

#[tokio::test]
async fn set_star_scenario() {
    let (_temp_dir, app) = test_app().await;
    let todo = add_todo(&app, json!({"title": "buy milk", "star": 0})).await;
    let id = todo["ID"].as_u64().unwrap();

    let body = json!({"id": id, "star": 7}).to_string();
    let (status, json) = send(&app, request("PUT", "/set-star", &body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({"error": "star value out of range. valid range is 0 to 5"})
    );

    let body = json!({"id": id, "star": 3}).to_string();
    let (status, json) = send(&app, request("PUT", "/set-star", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"error": null}));

    let (_, json) = send(&app, request("GET", "/", "")).await;
    assert_eq!(json["t"][0]["star"], 3);
}

#[tokio::test]
async fn delete_takes_id_from_path() {
    let (_temp_dir, app) = test_app().await;
    let todo = add_todo(&app, json!({"title": "temporary"})).await;
    let id = todo["ID"].as_u64().unwrap();

    let (status, json) = send(&app, request("DELETE", &format!("/delete/{id}"), "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"error": null}));

    let (_, json) = send(&app, request("GET", "/", "")).await;
    assert_eq!(json["t"], json!([]));

    let (status, json) = send(&app, request("DELETE", &format!("/delete/{id}"), "")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], format!("Todo with ID {id} not found"));
}

#[tokio::test]
async fn delete_with_bad_path_id_is_500() {
    let (_temp_dir, app) = test_app().await;

    let (status, json) = send(&app, request("DELETE", "/delete/abc", "")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("not a valid ID"));
}

#[tokio::test]
async fn update_overwrites_todo() {
    let (_temp_dir, app) = test_app().await;
    let todo = add_todo(
        &app,
        json!({"title": "draft", "description": "old", "star": 2}),
    )
    .await;
    let id = todo["ID"].as_u64().unwrap();

    let body = json!({"ID": id, "title": "final"}).to_string();
    let (status, json) = send(&app, request("PUT", "/update", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["t"]["title"], "final");
    assert_eq!(json["t"]["description"], "");
    assert_eq!(json["t"]["star"], 0);

    let (_, json) = send(&app, request("GET", "/", "")).await;
    assert_eq!(json["t"][0]["title"], "final");
}

#[tokio::test]
async fn reply_to_and_get_childes() {
    let (_temp_dir, app) = test_app().await;
    let parent = add_todo(&app, json!({"title": "plan trip"})).await;
    let parent_id = parent["ID"].as_u64().unwrap();

    let body = json!({"parent_id": parent_id.to_string(), "todo": {"title": "book hotel"}});
    let (status, json) = send(&app, request("POST", "/reply-to", &body.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["t"]["parent_id"], parent_id);
    assert_eq!(json["t"]["title"], "book hotel");

    let uri = format!("/get-childes/{parent_id}");
    let (status, json) = send(&app, request("GET", &uri, "")).await;
    assert_eq!(status, StatusCode::OK);
    let children = json["t"].as_array().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["title"], "book hotel");
}

// --- categories ---

#[tokio::test]
async fn category_routes() {
    let (_temp_dir, app) = test_app().await;

    let (status, json) = send(
        &app,
        request("POST", "/add-category", r#"{"name": "Work"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let work_id = json["t"]["ID"].as_u64().unwrap();
    assert_eq!(json["t"]["name"], "Work");

    let body = json!({"name": "Meetings", "parent_id": work_id}).to_string();
    let (_, json) = send(&app, request("POST", "/add-category", &body)).await;
    let meetings_id = json["t"]["ID"].as_u64().unwrap();

    let (status, json) = send(&app, request("GET", "/get-category", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["t"].as_array().unwrap().len(), 2);

    let body = json!({"ID": meetings_id, "name": "Standups", "parent_id": work_id}).to_string();
    let (status, json) = send(&app, request("PUT", "/update-category", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["t"]["name"], "Standups");

    // Category children are looked up from the body, not the path.
    let body = json!({"id": work_id}).to_string();
    let (status, json) = send(&app, request("GET", "/get-cat-childes", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["t"][0]["name"], "Standups");

    let body = json!({"id": meetings_id.to_string()}).to_string();
    let (status, json) = send(&app, request("DELETE", "/delete-category", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"error": null}));

    let body = json!({"id": work_id}).to_string();
    let (_, json) = send(&app, request("GET", "/get-cat-childes", &body)).await;
    assert_eq!(json["t"], json!([]));
}

// --- errors ---

#[tokio::test]
async fn undecodable_body_is_500() {
    let (_temp_dir, app) = test_app().await;

    let (status, json) = send(&app, request("POST", "/add", "not json")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].is_string());
    assert!(json.get("t").is_none());

    let (status, _) = send(&app, request("PUT", "/set-complete", "")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn missing_record_is_500_not_404() {
    let (_temp_dir, app) = test_app().await;

    let (status, json) = send(&app, request("PUT", "/set-complete", r#"{"id": 5}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "Todo with ID 5 not found"}));
}

#[tokio::test]
async fn body_is_decoded_whatever_the_content_type() {
    let (_temp_dir, app) = test_app().await;

    let req = Request::builder()
        .method("POST")
        .uri("/add")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"title": "typed wrong"}"#))
        .unwrap();
    let (status, json) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["t"]["title"], "typed wrong");
}

// --- cors ---

#[tokio::test]
async fn cors_allows_any_origin() {
    let (_temp_dir, app) = test_app().await;

    let req = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let (_temp_dir, app) = test_app().await;

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/set-star")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "{methods}");
    }
    let allowed = headers
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("content-type"));
    assert!(allowed.contains("content-length"));
}

#[tokio::test]
async fn list_routes_ignore_the_body() {
    let (_temp_dir, app) = test_app().await;
    add_todo(&app, json!({"title": "listed"})).await;

    let (status, json) = send(&app, request("GET", "/", "definitely not json")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["t"][0]["title"], "listed");

    let (status, json) = send(&app, request("GET", "/get-category", "{oops")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"t": [], "error": null}));
}

#[tokio::test]
async fn missing_optional_fields_default_to_zero() {
    let (_temp_dir, app) = test_app().await;
    let todo = add_todo(&app, json!({"title": "rated", "star": 4})).await;
    let id = todo["ID"].as_u64().unwrap();

    // No star resets the rating to 0.
    let body = json!({"id": id.to_string()}).to_string();
    let (status, json) = send(&app, request("PUT", "/set-star", &body)).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    let (_, json) = send(&app, request("GET", "/", "")).await;
    assert_eq!(json["t"][0]["star"], 0);

    // No parent makes a top-level todo.
    let body = json!({"todo": {"title": "loose reply"}}).to_string();
    let (status, json) = send(&app, request("POST", "/reply-to", &body)).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["t"]["parent_id"], 0);
}

#[tokio::test]
async fn oversized_id_is_rejected() {
    let (_temp_dir, app) = test_app().await;

    let body = json!({"ID": u64::MAX, "title": "too big"}).to_string();
    let (status, json) = send(&app, request("PUT", "/update", &body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("out of range"), "{json}");

    let (_, json) = send(&app, request("GET", "/", "")).await;
    assert_eq!(json["t"], json!([]));
}
