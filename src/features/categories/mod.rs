//! Product category hierarchy.
//!
//! Categories form a single-parent tree; a `parent_id` of `0` marks a root.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/category` | Create a category |
//! | PUT | `/category/{id}` | Replace a category |
//! | DELETE | `/category/{id}` | Delete a category (children are kept) |
//! | GET | `/category/{id}` | Get category by id |
//! | GET | `/category/parent/{parent_id}` | List direct children |
//! | GET | `/category?ids=1,2,3` | Get several categories, unknown ids are skipped |
//! | GET | `/category/path?cid={id}` | Root-first path down to a category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::CategoryService;
