use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::database::json_store::{ProductStore, StoreError};
use crate::domain::{next_id, Product};

/// Errors from the product repository
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("product not found")]
    NotFound(i64),

    #[error("invalid product code value")]
    InvalidCode(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Rewrites a stored product; runs while the collection is locked for writing.
pub type ProductChange = Box<dyn FnOnce(Product) -> Product + Send>;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all(&self) -> Vec<Product>;
    async fn get_by_id(&self, id: i64) -> Result<Product, RepositoryError>;
    /// Products priced strictly above `price`; an empty result is not an error here.
    async fn get_by_price_gt(&self, price: f64) -> Vec<Product>;
    async fn create(&self, product: Product) -> Result<Product, RepositoryError>;
    /// Replaces product `id` with `change(current)`, with no other writer in between.
    async fn update_with(&self, id: i64, change: ProductChange)
        -> Result<Product, RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

/// Ordered product collection held in memory behind a single lock.
///
/// When a store is attached, each mutation is applied to a copy of the
/// collection, flushed, and only then committed.
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
    store: Option<Arc<dyn ProductStore>>,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
            store: None,
        }
    }

    /// Flush every successful mutation to `store`
    pub fn with_store(mut self, store: Arc<dyn ProductStore>) -> Self {
        self.store = Some(store);
        self
    }

    fn persist(&self, products: &[Product]) -> Result<(), RepositoryError> {
        if let Some(store) = &self.store {
            store.save(products)?;
        }
        Ok(())
    }

    /// Applies `mutate` to a working copy, persists it, then swaps it in.
    async fn mutate<T>(
        &self,
        mutate: impl FnOnce(&mut Vec<Product>) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut guard = self.products.write().await;
        if self.store.is_none() {
            return mutate(&mut *guard);
        }

        let mut working = guard.clone();
        let result = mutate(&mut working)?;
        self.persist(&working)?;
        *guard = working;
        Ok(result)
    }
}

fn code_in_use(products: &[Product], code_value: &str) -> bool {
    products.iter().any(|p| p.code_value == code_value)
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, RepositoryError> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn get_by_price_gt(&self, price: f64) -> Vec<Product> {
        self.products
            .read()
            .await
            .iter()
            .filter(|p| p.price > price)
            .cloned()
            .collect()
    }

    async fn create(&self, mut product: Product) -> Result<Product, RepositoryError> {
        self.mutate(|products| {
            if code_in_use(products, &product.code_value) {
                return Err(RepositoryError::InvalidCode(product.code_value.clone()));
            }
            product.id = next_id(products);
            products.push(product.clone());
            debug!("Created product {} ({})", product.id, product.code_value);
            Ok(product)
        })
        .await
    }

    async fn update_with(
        &self,
        id: i64,
        change: ProductChange,
    ) -> Result<Product, RepositoryError> {
        self.mutate(|products| {
            let index = products
                .iter()
                .position(|p| p.id == id)
                .ok_or(RepositoryError::NotFound(id))?;

            let mut product = change(products[index].clone());
            if products[index].code_value != product.code_value
                && code_in_use(products, &product.code_value)
            {
                return Err(RepositoryError::InvalidCode(product.code_value.clone()));
            }

            product.id = id;
            products[index] = product.clone();
            debug!("Updated product {}", id);
            Ok(product)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.mutate(|products| {
            let index = products
                .iter()
                .position(|p| p.id == id)
                .ok_or(RepositoryError::NotFound(id))?;
            products.remove(index);
            debug!("Deleted product {}", id);
            Ok(())
        })
        .await
    }
}
