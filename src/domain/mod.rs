pub mod product;

pub use product::{next_id, Product, ProductUpdateRequest, ValidationError};
