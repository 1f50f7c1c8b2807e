mod category_service;
mod path_resolver;

pub use category_service::CategoryService;
pub use path_resolver::CategoryPathResolver;
