use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryChanges, NewCategory};
use crate::features::categories::stores::CategoryStore;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Category>,
    last_id: i64,
}

/// Process-local `CategoryStore`.
///
/// Ids are assigned from a counter that only moves forward, so ids of deleted
/// categories are never handed out again.
#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    table: RwLock<Table>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn insert(&self, category: NewCategory) -> Result<Category> {
        let mut table = self.table.write().await;

        let id = match category.id {
            Some(id) if id <= 0 => {
                return Err(AppError::Validation(
                    "Category id must be positive".to_string(),
                ))
            }
            Some(id) if table.rows.contains_key(&id) => {
                return Err(AppError::Validation(
                    "A category with this id already exists".to_string(),
                ))
            }
            Some(id) => id,
            None => table.last_id.checked_add(1).ok_or_else(|| {
                AppError::Validation("No category ids left to assign".to_string())
            })?,
        };
        table.last_id = table.last_id.max(id);

        let now = Utc::now();
        let changes = category.changes;
        let row = Category {
            id,
            name: changes.name,
            parent_id: changes.parent_id,
            is_parent: changes.is_parent,
            icon: changes.icon,
            sort: changes.sort,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, row.clone());

        Ok(row)
    }

    async fn update_by_id(&self, id: i64, changes: CategoryChanges) -> Result<Option<Category>> {
        let mut table = self.table.write().await;

        Ok(table.rows.get_mut(&id).map(|row| {
            row.name = changes.name;
            row.parent_id = changes.parent_id;
            row.is_parent = changes.is_parent;
            row.icon = changes.icon;
            row.sort = changes.sort;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list_by_parent_id(&self, parent_id: i64) -> Result<Vec<Category>> {
        let table = self.table.read().await;

        Ok(table
            .rows
            .values()
            .filter(|c| c.parent_id == parent_id)
            .cloned()
            .collect())
    }

    async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>> {
        let table = self.table.read().await;

        Ok(table
            .rows
            .values()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }
}
