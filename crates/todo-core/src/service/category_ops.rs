//! Category operations against an open database.

use crate::{db::Database, error::Result, models::Category};

pub(crate) fn add(db: &Database, category: Category) -> Result<Category> {
    db.create(category)
}

pub(crate) fn get(db: &Database) -> Result<Vec<Category>> {
    db.find_all()
}

pub(crate) fn update(db: &Database, category: Category) -> Result<Category> {
    db.save(category)
}

pub(crate) fn delete(db: &Database, id: u64) -> Result<()> {
    let category: Category = db.find_by_id(id)?;
    db.soft_delete(&category)
}

pub(crate) fn get_childes(db: &Database, id: u64) -> Result<Vec<Category>> {
    db.find_by_parent(id)
}
