pub mod category_dto;

pub use category_dto::{
    CategoryIdsQuery, CategoryPathQuery, CategoryResponseDto, CreateCategoryDto,
    UpdateCategoryDto,
};
