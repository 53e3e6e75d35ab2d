pub mod json_store;
pub mod repository;

pub use json_store::{JsonStore, ProductStore, StoreError};
pub use repository::{InMemoryProductRepository, ProductChange, ProductRepository, RepositoryError};
