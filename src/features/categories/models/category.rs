use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// `parent_id` value carried by root categories. Never a valid category id.
pub const ROOT_PARENT_ID: i64 = 0;

/// Database model for category
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: i64,
    /// True when the category is meant to hold sub-categories
    pub is_parent: bool,
    pub icon: Option<String>,
    pub sort: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }
}

/// Insert payload. `id` is normally left for the store to assign.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub id: Option<i64>,
    pub changes: CategoryChanges,
}

/// Every mutable column of a category; updates replace all of them.
#[derive(Debug, Clone)]
pub struct CategoryChanges {
    pub name: String,
    pub parent_id: i64,
    pub is_parent: bool,
    pub icon: Option<String>,
    pub sort: i32,
}
