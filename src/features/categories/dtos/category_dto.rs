use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::AppError;
use crate::features::categories::models::{
    Category, CategoryChanges, NewCategory, ROOT_PARENT_ID,
};

fn default_parent_id() -> i64 {
    ROOT_PARENT_ID
}

/// Request body for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    /// Explicit id for the new category. Normally omitted so one is assigned.
    #[validate(range(min = 1))]
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 64))]
    pub name: String,

    /// Parent category id, `0` for a root category
    #[serde(default = "default_parent_id")]
    #[validate(range(min = 0))]
    pub parent_id: i64,

    #[serde(default)]
    pub is_parent: bool,

    #[validate(url, length(max = 255))]
    pub icon: Option<String>,

    #[serde(default)]
    pub sort: i32,
}

/// Request body for replacing a category. Every field is overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    /// Parent category id, `0` for a root category
    #[validate(range(min = 0))]
    pub parent_id: i64,

    pub is_parent: bool,

    #[validate(url, length(max = 255))]
    pub icon: Option<String>,

    pub sort: i32,
}

impl From<CreateCategoryDto> for NewCategory {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            id: dto.id,
            changes: CategoryChanges {
                name: dto.name,
                parent_id: dto.parent_id,
                is_parent: dto.is_parent,
                icon: dto.icon,
                sort: dto.sort,
            },
        }
    }
}

impl From<UpdateCategoryDto> for CategoryChanges {
    fn from(dto: UpdateCategoryDto) -> Self {
        Self {
            name: dto.name,
            parent_id: dto.parent_id,
            is_parent: dto.is_parent,
            icon: dto.icon,
            sort: dto.sort,
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub parent_id: i64,
    pub is_parent: bool,
    pub icon: Option<String>,
    pub sort: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            parent_id: c.parent_id,
            is_parent: c.is_parent,
            icon: c.icon,
            sort: c.sort,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Query params for looking up several categories at once
///
/// Both `ids=1,2,3` and `ids=1&ids=2&ids=3` are accepted, and may be mixed.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryIdsQuery {
    /// Category ids, comma-separated and/or repeated
    pub ids: Vec<String>,
}

impl CategoryIdsQuery {
    /// Collects every `ids` value from raw query pairs; other keys are ignored
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            ids: pairs
                .into_iter()
                .filter(|(key, _)| key == "ids")
                .map(|(_, value)| value)
                .collect(),
        }
    }

    /// Parse `ids` into a deduplicated list, keeping first-seen order
    pub fn parse_ids(&self) -> Result<Vec<i64>, AppError> {
        let mut ids = Vec::new();
        let values = self.ids.iter().flat_map(|v| v.split(','));
        for raw in values.map(str::trim).filter(|s| !s.is_empty()) {
            let id = raw
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid category id '{}'", raw)))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        if ids.is_empty() {
            return Err(AppError::BadRequest(
                "At least one category id is required".to_string(),
            ));
        }

        Ok(ids)
    }
}

/// Query params for the ancestor path lookup
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryPathQuery {
    /// Id of the category whose path is requested
    pub cid: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids_query(ids: &str) -> CategoryIdsQuery {
        CategoryIdsQuery {
            ids: vec![ids.to_string()],
        }
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(ids_query("1,2,3").parse_ids().unwrap(), vec![1, 2, 3]);
        assert_eq!(ids_query(" 4 , 5,").parse_ids().unwrap(), vec![4, 5]);
        assert_eq!(ids_query("7,7,2,7").parse_ids().unwrap(), vec![7, 2]);
    }

    #[test]
    fn test_repeated_and_mixed_ids() {
        let repeated = CategoryIdsQuery::from_pairs(pairs(&[("ids", "1"), ("ids", "2")]));
        assert_eq!(repeated.parse_ids().unwrap(), vec![1, 2]);

        let mixed = CategoryIdsQuery::from_pairs(pairs(&[
            ("ids", "3,4"),
            ("page", "9"),
            ("ids", "4"),
            ("ids", "5"),
        ]));
        assert_eq!(mixed.parse_ids().unwrap(), vec![3, 4, 5]);
    }

    #[test]
    fn test_missing_ids_rejected() {
        let query = CategoryIdsQuery::from_pairs(pairs(&[("cid", "1")]));
        assert!(matches!(query.parse_ids(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_parse_ids_rejects_garbage() {
        assert!(matches!(
            ids_query("1,two").parse_ids(),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            ids_query(" , ").parse_ids(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_create_dto_defaults() {
        let dto: CreateCategoryDto = serde_json::from_str(r#"{"name": "Books"}"#).unwrap();

        assert_eq!(dto.id, None);
        assert_eq!(dto.parent_id, ROOT_PARENT_ID);
        assert!(!dto.is_parent);
        assert_eq!(dto.sort, 0);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_validation() {
        let mut dto: CreateCategoryDto = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(dto.validate().is_err());

        dto.name = "Books".to_string();
        dto.id = Some(0);
        assert!(dto.validate().is_err());

        dto.id = None;
        dto.icon = Some("not a url".to_string());
        assert!(dto.validate().is_err());

        dto.icon = Some("https://cdn.example.com/icons/books.png".to_string());
        assert!(dto.validate().is_ok());
    }
}
