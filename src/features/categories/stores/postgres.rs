use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryChanges, NewCategory};
use crate::features::categories::stores::CategoryStore;

const CATEGORY_COLUMNS: &str =
    "id, name, parent_id, is_parent, icon, sort, created_at, updated_at";

/// Sequence value to set after inserting `explicit_id`. Never moves the
/// sequence backwards, so ids of deleted categories are not handed out again.
fn sequence_position_after(explicit_id: i64, last_value: Option<i64>) -> i64 {
    last_value.map_or(explicit_id, |last| last.max(explicit_id))
}

/// Convert database error to more specific AppError with user-friendly messages
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // unique_violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Validation("A category with this id already exists".to_string());
        }
        // sequence_generator_limit_exceeded
        if db_err.code() == Some(std::borrow::Cow::Borrowed("2200H")) {
            return AppError::Validation("No category ids left to assign".to_string());
        }
        // check_violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23514")) {
            return AppError::Validation(
                "Category id must be positive and parent id must not be negative".to_string(),
            );
        }
    }

    tracing::error!("Category query failed: {:?}", e);
    AppError::Database(e)
}

/// `CategoryStore` backed by the `categories` table
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn insert(&self, category: NewCategory) -> Result<Category> {
        let NewCategory { id, changes } = category;

        let query = format!(
            r#"
            INSERT INTO categories (id, name, parent_id, is_parent, icon, sort)
            VALUES (COALESCE($1, nextval(pg_get_serial_sequence('categories', 'id'))), $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let mut tx = self.pool.begin().await.map_err(handle_db_error)?;

        let created = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(changes.name)
            .bind(changes.parent_id)
            .bind(changes.is_parent)
            .bind(changes.icon)
            .bind(changes.sort)
            .fetch_one(&mut *tx)
            .await
            .map_err(handle_db_error)?;

        // An explicit id bypasses the sequence; move it past that id so later
        // store-assigned ids do not collide with it.
        if id.is_some() {
            let last_value: Option<i64> = sqlx::query_scalar(
                "SELECT pg_sequence_last_value(pg_get_serial_sequence('categories', 'id')::regclass)",
            )
            .fetch_one(&mut *tx)
            .await
            .map_err(handle_db_error)?;

            sqlx::query("SELECT setval(pg_get_serial_sequence('categories', 'id'), $1)")
                .bind(sequence_position_after(created.id, last_value))
                .execute(&mut *tx)
                .await
                .map_err(handle_db_error)?;
        }

        tx.commit().await.map_err(handle_db_error)?;

        Ok(created)
    }

    async fn update_by_id(&self, id: i64, changes: CategoryChanges) -> Result<Option<Category>> {
        let query = format!(
            r#"
            UPDATE categories
            SET name = $1,
                parent_id = $2,
                is_parent = $3,
                icon = $4,
                sort = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(changes.name)
            .bind(changes.parent_id)
            .bind(changes.is_parent)
            .bind(changes.icon)
            .bind(changes.sort)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn list_by_parent_id(&self, parent_id: i64) -> Result<Vec<Category>> {
        let query = format!(
            "SELECT {} FROM categories WHERE parent_id = $1 ORDER BY id",
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {} FROM categories WHERE id = ANY($1) ORDER BY id",
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_position_after_explicit_id() {
        // Fresh sequence: jump to the explicit id
        assert_eq!(sequence_position_after(5, None), 5);
        // Explicit id ahead of the sequence
        assert_eq!(sequence_position_after(74, Some(3)), 74);
        // Explicit id below the sequence: keep the sequence where it is
        assert_eq!(sequence_position_after(2, Some(40)), 40);
        assert_eq!(sequence_position_after(i64::MAX, Some(1)), i64::MAX);
    }

    #[test]
    fn test_non_database_errors_stay_database_errors() {
        assert!(matches!(
            handle_db_error(sqlx::Error::RowNotFound),
            AppError::Database(_)
        ));
    }
}
