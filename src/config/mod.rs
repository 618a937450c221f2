//! Configuration: category catalog, YAML schema, and multi-source loading.

pub mod catalog;
pub mod loader;
pub mod schema;

pub use catalog::{Catalog, Category};
pub use loader::load_config;
pub use schema::{BiblioConfig, SelectionConfig};
