use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// HTTP server for hierarchical todos and categories
///
/// Serves a JSON API over a local SQLite database. Todos can be nested under
/// other todos as replies and tagged with categories, which nest the same
/// way. Deleted records are kept in the database but hidden from every read.
#[derive(Parser, Debug)]
#[command(version, about, name = "todo-server")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/todo/todo.db
    #[arg(long)]
    pub database_file: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// Do not log every service call
    #[arg(long)]
    pub no_log_middleware: bool,
}
