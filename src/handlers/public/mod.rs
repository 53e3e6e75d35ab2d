// handlers/public/mod.rs - Public handlers (no token required)
//
// Read-only product queries plus the service probes mounted outside /api/v1.

pub mod products;
pub mod system;

pub use products::{product_get, products_all, products_search};
pub use system::{panic_probe, ping, root};
