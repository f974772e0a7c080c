//! Record CRUD operations shared by todos and categories.

use jiff::Timestamp;
use rusqlite::{params, params_from_iter, types::Value, OptionalExtension};

use super::record::{sql_id, Record, META_COLUMNS};
use crate::error::{DatabaseResultExt, Result, TodoError};

const LIVE_ROWS: &str = "deleted_at IS NULL";

fn select_sql<R: Record>(extra_condition: Option<&str>) -> String {
    let condition = match extra_condition {
        Some(extra) => format!("{LIVE_ROWS} AND {extra}"),
        None => LIVE_ROWS.to_string(),
    };
    format!(
        "SELECT {META_COLUMNS}, {} FROM {} WHERE {condition} ORDER BY id",
        R::COLUMNS.join(", "),
        R::TABLE
    )
}

fn insert_sql<R: Record>() -> String {
    let placeholders = (1..=R::COLUMNS.len() + 3)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} (id, created_at, updated_at, {}) VALUES ({placeholders})",
        R::TABLE,
        R::COLUMNS.join(", ")
    )
}

fn update_sql<R: Record>() -> String {
    let assignments = R::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ?{}", i + 2))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET updated_at = ?1, {assignments} WHERE id = ?{} AND {LIVE_ROWS}",
        R::TABLE,
        R::COLUMNS.len() + 2
    )
}

impl super::Database {
    /// Lists every live record of a kind, oldest first.
    pub fn find_all<R: Record>(&self) -> Result<Vec<R>> {
        let mut stmt = self
            .connection
            .prepare(&select_sql::<R>(None))
            .db_context("Failed to prepare query")?;

        let records = stmt
            .query_map([], R::from_row)
            .db_context("Failed to query records")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read records")?;
        Ok(records)
    }

    /// Retrieves a live record by its ID.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::NotFound` if no row has this ID or the row is
    /// soft-deleted.
    pub fn find_by_id<R: Record>(&self, id: u64) -> Result<R> {
        let mut stmt = self
            .connection
            .prepare(&select_sql::<R>(Some("id = ?1")))
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![sql_id("id", id)?], R::from_row)
            .optional()
            .db_context("Failed to query record")?
            .ok_or(TodoError::NotFound { kind: R::KIND, id })
    }

    /// Lists the live direct children of `parent_id`.
    pub fn find_by_parent<R: Record>(&self, parent_id: u64) -> Result<Vec<R>> {
        let mut stmt = self
            .connection
            .prepare(&select_sql::<R>(Some("parent_id = ?1")))
            .db_context("Failed to prepare query")?;

        let records = stmt
            .query_map(params![sql_id("parent_id", parent_id)?], R::from_row)
            .db_context("Failed to query records")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read records")?;
        Ok(records)
    }

    /// Inserts a record and returns it with ID and timestamps filled in.
    ///
    /// A non-zero ID on the input is kept; otherwise SQLite assigns one.
    pub fn create<R: Record>(&self, mut record: R) -> Result<R> {
        let now = Timestamp::now();
        let now_str = now.to_string();
        let id = record.meta().id;

        let mut values = Vec::with_capacity(R::COLUMNS.len() + 3);
        values.push(if id == 0 {
            Value::Null
        } else {
            Value::Integer(sql_id("id", id)?)
        });
        values.push(Value::Text(now_str.clone()));
        values.push(Value::Text(now_str));
        values.extend(record.values()?);

        self.connection
            .execute(&insert_sql::<R>(), params_from_iter(values))
            .db_context("Failed to insert record")?;

        let meta = record.meta_mut();
        meta.id = self.connection.last_insert_rowid() as u64;
        meta.created_at = Some(now);
        meta.updated_at = Some(now);
        meta.deleted_at = None;
        Ok(record)
    }

    /// Writes every user column of the record by ID and returns the stored row.
    ///
    /// Records without an ID, or whose ID matches no live row, are inserted.
    pub fn save<R: Record>(&self, record: R) -> Result<R> {
        let id = record.meta().id;
        if id == 0 {
            return self.create(record);
        }

        let mut values = Vec::with_capacity(R::COLUMNS.len() + 2);
        values.push(Value::Text(Timestamp::now().to_string()));
        values.extend(record.values()?);
        values.push(Value::Integer(sql_id("id", id)?));

        let changed = self
            .connection
            .execute(&update_sql::<R>(), params_from_iter(values))
            .db_context("Failed to update record")?;

        if changed == 0 {
            return self.create(record);
        }
        self.find_by_id(id)
    }

    /// Marks a record deleted so that later reads skip it.
    pub fn soft_delete<R: Record>(&self, record: &R) -> Result<()> {
        let id = record.meta().id;
        let sql = format!(
            "UPDATE {} SET deleted_at = ?1 WHERE id = ?2 AND {LIVE_ROWS}",
            R::TABLE
        );

        let changed = self
            .connection
            .execute(&sql, params![Timestamp::now().to_string(), sql_id("id", id)?])
            .db_context("Failed to delete record")?;

        if changed == 0 {
            return Err(TodoError::NotFound { kind: R::KIND, id });
        }
        Ok(())
    }
}
