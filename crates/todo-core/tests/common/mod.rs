use std::sync::Arc;

use tempfile::TempDir;
use todo_core::{Endpoints, TodoService, TodoServiceBuilder};

/// Helper function to create a test service on a fresh database
pub async fn create_test_service() -> (TempDir, Arc<dyn TodoService>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let service = TodoServiceBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create service");
    (temp_dir, service)
}

/// Helper function to create mediated endpoints on a fresh database
#[allow(dead_code)]
pub async fn create_test_endpoints() -> (TempDir, Endpoints) {
    let (temp_dir, service) = create_test_service().await;
    (temp_dir, Endpoints::new(service))
}
