use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::categories::dtos::{
    CategoryIdsQuery, CategoryPathQuery, CategoryResponseDto, CreateCategoryDto,
    UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// Create a category
#[utoipa::path(
    post,
    path = "/category",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or id already taken")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

/// Replace a category by id
#[utoipa::path(
    put,
    path = "/category/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or unknown category")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category by id
#[utoipa::path(
    delete,
    path = "/category/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 400, description = "Unknown category")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/category/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// List the direct children of a category
#[utoipa::path(
    get,
    path = "/category/parent/{parent_id}",
    params(
        ("parent_id" = i64, Path, description = "Parent category id, 0 for roots")
    ),
    responses(
        (status = 200, description = "Child categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 404, description = "No child categories")
    ),
    tag = "categories"
)]
pub async fn list_categories_by_parent(
    State(service): State<Arc<CategoryService>>,
    AppPath(parent_id): AppPath<i64>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list_by_parent_id(parent_id).await?;
    let meta = Meta::for_items(&categories);
    Ok(Json(ApiResponse::success(Some(categories), None, Some(meta))))
}

/// Get several categories by id
///
/// Ids that do not match a category are left out of the result.
#[utoipa::path(
    get,
    path = "/category",
    params(CategoryIdsQuery),
    responses(
        (status = 200, description = "Matching categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 400, description = "Malformed id list"),
        (status = 404, description = "None of the ids match a category")
    ),
    tag = "categories"
)]
pub async fn list_categories_by_ids(
    State(service): State<Arc<CategoryService>>,
    AppQuery(pairs): AppQuery<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let ids = CategoryIdsQuery::from_pairs(pairs).parse_ids()?;
    let categories = service.list_by_ids(&ids).await?;
    let meta = Meta::for_items(&categories);
    Ok(Json(ApiResponse::success(Some(categories), None, Some(meta))))
}

/// Get the path from the hierarchy root down to a category
///
/// The first element is the root, the last one is the requested category.
#[utoipa::path(
    get,
    path = "/category/path",
    params(CategoryPathQuery),
    responses(
        (status = 200, description = "Root-first category path", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 400, description = "Missing or malformed cid"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Parent links form a cycle")
    ),
    tag = "categories"
)]
pub async fn get_category_path(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<CategoryPathQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let path = service.ancestor_path(query.cid).await?;
    let meta = Meta::for_items(&path);
    Ok(Json(ApiResponse::success(Some(path), None, Some(meta))))
}
