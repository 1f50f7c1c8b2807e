use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryPathResolver;
use crate::features::categories::stores::CategoryStore;

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    resolver: CategoryPathResolver,
}

impl std::fmt::Debug for CategoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryService")
            .field("store", &"<dyn CategoryStore>")
            .finish()
    }
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        let resolver = CategoryPathResolver::new(Arc::clone(&store));
        Self { store, resolver }
    }

    /// Create a new category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category = self.store.insert(dto.into()).await?;
        tracing::info!(
            category_id = category.id,
            parent_id = category.parent_id,
            "Category created"
        );

        Ok(category.into())
    }

    /// Replace every mutable field of an existing category
    pub async fn update(&self, id: i64, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        if dto.parent_id == id {
            return Err(AppError::Validation(
                "A category cannot be its own parent".to_string(),
            ));
        }

        let category = self
            .store
            .update_by_id(id, dto.into())
            .await?
            .ok_or_else(|| AppError::Validation(format!("Category with id {} does not exist", id)))?;
        tracing::info!(category_id = id, "Category updated");

        Ok(category.into())
    }

    /// Delete a category. Its children keep pointing at the removed id.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.store.delete_by_id(id).await? {
            return Err(AppError::Validation(format!(
                "Category with id {} does not exist",
                id
            )));
        }
        tracing::info!(category_id = id, "Category deleted");

        Ok(())
    }

    /// Get category by id
    pub async fn get_by_id(&self, id: i64) -> Result<CategoryResponseDto> {
        self.store
            .get_by_id(id)
            .await?
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    /// List the direct children of `parent_id`
    pub async fn list_by_parent_id(&self, parent_id: i64) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.store.list_by_parent_id(parent_id).await?;
        if categories.is_empty() {
            return Err(AppError::NotFound(format!(
                "No categories found under parent {}",
                parent_id
            )));
        }

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List the categories matching `ids`; ids without a category are ignored
    pub async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.store.list_by_ids(ids).await?;
        if categories.is_empty() {
            return Err(AppError::NotFound(
                "No categories found for the given ids".to_string(),
            ));
        }
        tracing::debug!(
            requested = ids.len(),
            found = categories.len(),
            "Listed categories by ids"
        );

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Root-first path from the top of the hierarchy down to `cid`
    pub async fn ancestor_path(&self, cid: i64) -> Result<Vec<CategoryResponseDto>> {
        let path = self.resolver.ancestor_path(cid).await?;
        if path.is_empty() {
            return Err(AppError::NotFound(format!("Category with id {} not found", cid)));
        }

        Ok(path.into_iter().map(|c| c.into()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::ROOT_PARENT_ID;
    use crate::shared::test_helpers::{category_service, create_dto, update_dto};

    #[tokio::test]
    async fn test_create_then_get() {
        let (service, _) = category_service();

        let created = service
            .create(create_dto("Electronics", ROOT_PARENT_ID))
            .await
            .unwrap();
        let fetched = service.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.parent_id, ROOT_PARENT_ID);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (service, _) = category_service();

        assert!(matches!(
            service.get_by_id(1).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_is_validation_failure() {
        let (service, _) = category_service();

        assert!(matches!(
            service.update(3, update_dto("Phones", ROOT_PARENT_ID)).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_self_parent() {
        let (service, store) = category_service();
        let created = service
            .create(create_dto("Electronics", ROOT_PARENT_ID))
            .await
            .unwrap();

        let result = service
            .update(created.id, update_dto("Electronics", created.id))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        let unchanged = store.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(unchanged.parent_id, ROOT_PARENT_ID);
    }

    #[tokio::test]
    async fn test_delete_missing_is_validation_failure() {
        let (service, _) = category_service();

        assert!(matches!(
            service.delete(8).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_listings_are_not_found() {
        let (service, _) = category_service();
        service
            .create(create_dto("Electronics", ROOT_PARENT_ID))
            .await
            .unwrap();

        assert!(matches!(
            service.list_by_parent_id(77).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.list_by_ids(&[77, 78]).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.ancestor_path(77).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_ancestor_path_propagates_cycle() {
        let (service, _) = category_service();
        let a = service
            .create(create_dto("A", ROOT_PARENT_ID))
            .await
            .unwrap();
        let b = service.create(create_dto("B", a.id)).await.unwrap();
        service
            .update(a.id, update_dto("A", b.id))
            .await
            .unwrap();

        assert!(matches!(
            service.ancestor_path(b.id).await,
            Err(AppError::CycleDetected(_))
        ));
    }
}
