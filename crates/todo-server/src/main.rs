//! Todo HTTP server
//!
//! Opens the database, wires the service middleware, and serves the JSON API
//! until interrupted.

mod args;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use log::info;
use todo_core::{service::logging_middleware, Endpoints, TodoServiceBuilder};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        listen,
        no_log_middleware,
    } = Args::parse();

    let mut builder = TodoServiceBuilder::new().with_database_path(database_file);
    if !no_log_middleware {
        builder = builder.with_middleware(logging_middleware());
    }
    let service = builder
        .build()
        .await
        .context("Failed to initialize todo service")?;

    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind {listen}"))?;

    info!("Todo server listening on {}", listener.local_addr()?);

    todo_server::serve(listener, Endpoints::new(service))
        .await
        .context("HTTP server failed")?;

    info!("Todo server stopped");
    Ok(())
}
