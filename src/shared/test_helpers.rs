#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use fake::{faker::lorem::en::Word, Fake};

#[cfg(test)]
use crate::features::categories::dtos::{CreateCategoryDto, UpdateCategoryDto};
#[cfg(test)]
use crate::features::categories::stores::InMemoryCategoryStore;
#[cfg(test)]
use crate::features::categories::CategoryService;

/// Service over a fresh in-memory store. The store is returned as well so
/// tests can inspect or corrupt the rows behind the service's back.
#[cfg(test)]
pub fn category_service() -> (CategoryService, Arc<InMemoryCategoryStore>) {
    let store = Arc::new(InMemoryCategoryStore::new());
    let service = CategoryService::new(store.clone());
    (service, store)
}

#[cfg(test)]
pub fn fake_category_name() -> String {
    Word().fake()
}

#[cfg(test)]
pub fn create_dto(name: &str, parent_id: i64) -> CreateCategoryDto {
    CreateCategoryDto {
        id: None,
        name: name.to_string(),
        parent_id,
        is_parent: false,
        icon: None,
        sort: 0,
    }
}

#[cfg(test)]
pub fn update_dto(name: &str, parent_id: i64) -> UpdateCategoryDto {
    UpdateCategoryDto {
        name: name.to_string(),
        parent_id,
        is_parent: false,
        icon: None,
        sort: 0,
    }
}
