// handlers/protected/mod.rs - Protected handlers
//
// Mutating product routes. The router wraps all of them in
// `middleware::require_token`, so handlers here never check the token themselves.

pub mod products;

pub use products::{product_create, product_delete, product_patch, product_put};
