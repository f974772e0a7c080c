//! Database operations and SQLite management for todos and categories.
//!
//! A [`Database`] owns exactly one SQLite connection. Callers open one per
//! operation and drop it when the operation is done, which releases the
//! connection.
//!
//! Reads never return soft-deleted rows. The gateway is generic over
//! [`Record`], so todos and categories share every query.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod queries;
pub mod record;

pub use record::Record;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
