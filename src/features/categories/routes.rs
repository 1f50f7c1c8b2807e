use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/category",
            post(handlers::create_category).get(handlers::list_categories_by_ids),
        )
        .route("/category/path", get(handlers::get_category_path))
        .route(
            "/category/parent/{parent_id}",
            get(handlers::list_categories_by_parent),
        )
        .route(
            "/category/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}
