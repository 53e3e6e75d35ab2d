use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::{next_id, Product};

/// Errors from the flat-file product store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed product file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("product not found")]
    NotFound(i64),
}

/// Whole-collection persistence. Every write rewrites the full collection;
/// the single-record helpers are built on `load` and `save`.
pub trait ProductStore: Send + Sync {
    fn load(&self) -> Result<Vec<Product>, StoreError>;

    fn save(&self, products: &[Product]) -> Result<(), StoreError>;

    fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        self.load()
    }

    fn get_one(&self, id: i64) -> Result<Product, StoreError> {
        self.load()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Appends `product` under a freshly assigned id and returns the stored record.
    fn add_one(&self, mut product: Product) -> Result<Product, StoreError> {
        let mut products = self.load()?;
        product.id = next_id(&products);
        products.push(product.clone());
        self.save(&products)?;
        Ok(product)
    }

    fn update_one(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.load()?;
        let slot = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(StoreError::NotFound(product.id))?;
        *slot = product;
        self.save(&products)
    }

    fn delete_one(&self, id: i64) -> Result<(), StoreError> {
        let mut products = self.load()?;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        products.remove(index);
        self.save(&products)
    }
}

/// Product collection stored as a JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ProductStore for JsonStore {
    fn load(&self) -> Result<Vec<Product>, StoreError> {
        let data = fs::read(&self.path).map_err(|e| self.io_error(e))?;
        let products: Vec<Product> = serde_json::from_slice(&data)?;
        debug!("Loaded {} products from {}", products.len(), self.path.display());
        Ok(products)
    }

    fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(products)?;
        fs::write(&self.path, data).map_err(|e| self.io_error(e))?;
        debug!("Saved {} products to {}", products.len(), self.path.display());
        Ok(())
    }
}
