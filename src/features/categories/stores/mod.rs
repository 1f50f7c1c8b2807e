//! Persistence for category records.
//!
//! Only infrastructure failures are errors here. A missing row is reported
//! through `Option`/`bool` and it is up to the caller to decide what that
//! means.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::{Category, CategoryChanges, NewCategory};

pub use memory::InMemoryCategoryStore;
pub use postgres::PgCategoryStore;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Persist a new category and return it with its assigned id.
    ///
    /// Fails with `AppError::Validation` when an explicit id is already taken.
    async fn insert(&self, category: NewCategory) -> Result<Category>;

    /// Replace the mutable fields of the category with `id`.
    ///
    /// Returns `None` when no such category exists.
    async fn update_by_id(&self, id: i64, changes: CategoryChanges) -> Result<Option<Category>>;

    /// Returns `false` when no such category exists. Children are left untouched.
    async fn delete_by_id(&self, id: i64) -> Result<bool>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>>;

    /// Direct children of `parent_id`, ordered by id. Empty when there are none.
    async fn list_by_parent_id(&self, parent_id: i64) -> Result<Vec<Category>>;

    /// Categories whose id is in `ids`, ordered by id. Unknown ids are skipped.
    async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>>;
}
