//! Todo operations against an open database.
//!
//! Each function is one use case. Read-modify-write operations load and save
//! on the same connection without a transaction, so a concurrent writer
//! between the two steps is overwritten.

use crate::{
    db::Database,
    error::{Result, TodoError},
    models::Todo,
};

/// Highest accepted star rating.
pub const MAX_STAR: u8 = 5;

pub(crate) fn get(db: &Database) -> Result<Vec<Todo>> {
    db.find_all()
}

pub(crate) fn add(db: &Database, todo: Todo) -> Result<Todo> {
    db.create(todo)
}

pub(crate) fn set_complete(db: &Database, id: u64, complete: bool) -> Result<()> {
    let mut todo: Todo = db.find_by_id(id)?;
    todo.complete = complete;
    db.save(todo)?;
    Ok(())
}

pub(crate) fn delete(db: &Database, id: u64) -> Result<()> {
    let todo: Todo = db.find_by_id(id)?;
    db.soft_delete(&todo)
}

pub(crate) fn update(db: &Database, todo: Todo) -> Result<Todo> {
    db.save(todo)
}

/// Validates `star` only after the todo is found, so a missing ID reports
/// not-found even when the rating is also bad.
pub(crate) fn set_star(db: &Database, id: u64, star: i64) -> Result<()> {
    let mut todo: Todo = db.find_by_id(id)?;
    todo.star = validate_star(star)?;
    db.save(todo)?;
    Ok(())
}

pub(crate) fn reply_to(db: &Database, parent_id: u64, mut todo: Todo) -> Result<Todo> {
    todo.parent_id = parent_id;
    db.create(todo)
}

pub(crate) fn get_childes(db: &Database, id: u64) -> Result<Vec<Todo>> {
    db.find_by_parent(id)
}

/// Checks that a star rating lies in `0..=MAX_STAR`.
pub fn validate_star(star: i64) -> Result<u8> {
    u8::try_from(star)
        .ok()
        .filter(|s| *s <= MAX_STAR)
        .ok_or(TodoError::StarOutOfRange { star })
}
