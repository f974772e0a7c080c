//! Mapping between record models and their SQLite tables.

use jiff::Timestamp;
use rusqlite::{
    types::{Type, Value},
    Row,
};

use crate::{
    error::{Result, TodoError},
    models::{Category, RecordKind, RecordMeta, Todo},
};

/// Bookkeeping columns selected ahead of every record's own columns.
pub(crate) const META_COLUMNS: &str = "id, created_at, updated_at, deleted_at";
const META_COLUMN_COUNT: usize = 4;

/// A model that the gateway can store in its own table.
///
/// Rows are always selected as [`META_COLUMNS`] followed by
/// [`Record::COLUMNS`], in that order.
pub trait Record: Sized + Send + 'static {
    /// Kind reported in not-found errors
    const KIND: RecordKind;

    /// Backing table
    const TABLE: &'static str;

    /// User-writable columns, excluding the meta columns
    const COLUMNS: &'static [&'static str];

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Bind values for [`Record::COLUMNS`], in the same order.
    fn values(&self) -> Result<Vec<Value>>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

fn parse_timestamp(index: usize, raw: String) -> rusqlite::Result<Timestamp> {
    raw.parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn optional_timestamp(row: &Row<'_>, index: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(index)?
        .map(|raw| parse_timestamp(index, raw))
        .transpose()
}

pub(crate) fn meta_from_row(row: &Row<'_>) -> rusqlite::Result<RecordMeta> {
    Ok(RecordMeta {
        id: row.get::<_, i64>(0)? as u64,
        created_at: optional_timestamp(row, 1)?,
        updated_at: optional_timestamp(row, 2)?,
        deleted_at: optional_timestamp(row, 3)?,
    })
}

/// Converts an ID to SQLite's signed rowid, rejecting IDs above `i64::MAX`.
pub(crate) fn sql_id(field: &str, id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| {
        TodoError::invalid_input(field).with_reason(format!("ID {id} is out of range"))
    })
}

impl Record for Todo {
    const KIND: RecordKind = RecordKind::Todo;
    const TABLE: &'static str = "todos";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "category_id",
        "star",
        "complete",
        "parent_id",
    ];

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            Value::Text(self.title.clone()),
            Value::Text(self.description.clone()),
            Value::Integer(sql_id("category_id", self.category_id)?),
            Value::Integer(i64::from(self.star)),
            Value::Integer(i64::from(self.complete)),
            Value::Integer(sql_id("parent_id", self.parent_id)?),
        ])
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let base = META_COLUMN_COUNT;
        let star_index = base + 3;
        let star: i64 = row.get(star_index)?;
        let star = u8::try_from(star).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(star_index, Type::Integer, Box::new(e))
        })?;

        Ok(Todo {
            title: row.get(base)?,
            description: row.get(base + 1)?,
            category_id: row.get::<_, i64>(base + 2)? as u64,
            star,
            complete: row.get(base + 4)?,
            parent_id: row.get::<_, i64>(base + 5)? as u64,
            meta: meta_from_row(row)?,
        })
    }
}

impl Record for Category {
    const KIND: RecordKind = RecordKind::Category;
    const TABLE: &'static str = "todo_categories";
    const COLUMNS: &'static [&'static str] = &["name", "parent_id"];

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            Value::Text(self.name.clone()),
            Value::Integer(sql_id("parent_id", self.parent_id)?),
        ])
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let base = META_COLUMN_COUNT;
        Ok(Category {
            name: row.get(base)?,
            parent_id: row.get::<_, i64>(base + 1)? as u64,
            meta: meta_from_row(row)?,
        })
    }
}
