mod category;

pub use category::{Category, CategoryChanges, NewCategory, ROOT_PARENT_ID};
