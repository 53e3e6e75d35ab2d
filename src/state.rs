use std::sync::Arc;

use crate::services::ProductService;

/// Shared router state: the product service and the shared secret guarding writes
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub token: Arc<str>,
}

impl AppState {
    pub fn new(products: ProductService, token: impl Into<Arc<str>>) -> Self {
        Self {
            products,
            token: token.into(),
        }
    }
}
