use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::database::json_store::StoreError;
use crate::database::repository::{ProductRepository, RepositoryError};
use crate::domain::{Product, ProductUpdateRequest};

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product not found")]
    NotFound(i64),
    #[error("invalid product code value")]
    InvalidCode(String),
    #[error("no products found")]
    NoProductsFound,
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<RepositoryError> for ProductError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => ProductError::NotFound(id),
            RepositoryError::InvalidCode(code) => ProductError::InvalidCode(code),
            RepositoryError::Store(e) => ProductError::Store(e),
        }
    }
}

/// Business rules over the product repository
#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Vec<Product> {
        self.repository.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Product, ProductError> {
        Ok(self.repository.get_by_id(id).await?)
    }

    /// Unlike the repository, an empty match is reported as an error.
    pub async fn get_by_price_gt(&self, price: f64) -> Result<Vec<Product>, ProductError> {
        let products = self.repository.get_by_price_gt(price).await;
        if products.is_empty() {
            return Err(ProductError::NoProductsFound);
        }
        Ok(products)
    }

    pub async fn create(&self, product: Product) -> Result<Product, ProductError> {
        Ok(self.repository.create(product).await?)
    }

    /// Merges `changes` into the stored product while the repository holds its write lock.
    pub async fn update(
        &self,
        id: i64,
        changes: ProductUpdateRequest,
    ) -> Result<Product, ProductError> {
        let updated = self
            .repository
            .update_with(id, Box::new(move |existing| merge(existing, changes)))
            .await?;
        debug!("Merged update for product {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ProductError> {
        Ok(self.repository.delete(id).await?)
    }
}

/// Empty strings and zero numbers leave a field unchanged. The published
/// flag cannot tell `false` from "not sent", so it is always taken.
fn merge(mut product: Product, changes: ProductUpdateRequest) -> Product {
    if let Some(name) = changes.name.filter(|v| !v.is_empty()) {
        product.name = name;
    }
    if let Some(quantity) = changes.quantity.filter(|v| *v > 0) {
        product.quantity = quantity;
    }
    if let Some(code_value) = changes.code_value.filter(|v| !v.is_empty()) {
        product.code_value = code_value;
    }
    if let Some(expiration) = changes.expiration.filter(|v| !v.is_empty()) {
        product.expiration = expiration;
    }
    if let Some(price) = changes.price.filter(|v| *v > 0.0) {
        product.price = price;
    }
    product.is_published = changes.is_published;
    product
}
