use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::database::InMemoryProductRepository;
use crate::domain::Product;
use crate::middleware::TOKEN_HEADER;
use crate::services::ProductService;
use crate::state::AppState;

pub const TEST_TOKEN: &str = "test-token";

/// Three products with contiguous ids 1..=3
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Apple".to_string(),
            quantity: 100,
            code_value: "APP001".to_string(),
            is_published: true,
            expiration: "15/03/2099".to_string(),
            price: 120.5,
        },
        Product {
            id: 2,
            name: "Banana".to_string(),
            quantity: 40,
            code_value: "BAN002".to_string(),
            is_published: false,
            expiration: "01/06/2099".to_string(),
            price: 45.0,
        },
        Product {
            id: 3,
            name: "Cherry".to_string(),
            quantity: 7,
            code_value: "CHE003".to_string(),
            is_published: true,
            expiration: "20/11/2099".to_string(),
            price: 310.0,
        },
    ]
}

/// A valid, not yet stored product with the given code
pub fn new_product(code_value: &str) -> Product {
    Product {
        id: 0,
        name: "Dragon fruit".to_string(),
        quantity: 12,
        code_value: code_value.to_string(),
        is_published: true,
        expiration: "31/12/2099".to_string(),
        price: 99.9,
    }
}

/// Unique path in the temp dir, removed on drop
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Path only; the file is not created
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("products_{}.json", Uuid::new_v4().simple()));
        Self { path }
    }

    pub fn with_contents(contents: &str) -> Self {
        let file = Self::new();
        std::fs::write(&file.path, contents).expect("failed to write temp file");
        file
    }

    pub fn with_products(products: &[Product]) -> Self {
        let contents = serde_json::to_string(products).expect("failed to encode products");
        Self::with_contents(&contents)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// In-process application seeded with `sample_products`, driven through `oneshot`
pub struct TestContext {
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_products(sample_products())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let repository = Arc::new(InMemoryProductRepository::new(products));
        let state = AppState::new(ProductService::new(repository), TEST_TOKEN);
        Self {
            app: crate::routes::app(state, &ApiConfig::default()),
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    /// Sends a request; an empty response body comes back as `Value::Null`
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ping_answers_pong() {
        let ctx = TestContext::new();
        let (status, body) = ctx.get("/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("pong".to_string()));
    }

    #[tokio::test]
    async fn panic_route_is_recovered_as_500() {
        let ctx = TestContext::new();
        let (status, body) = ctx.get("/panic").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
        assert_eq!(body["code"], "Internal Server Error");

        // the router keeps serving afterwards
        let (status, _) = ctx.get("/api/v1/products/1").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn unsupported_method_is_405_not_401() {
        let ctx = TestContext::new();
        let (status, _) = ctx.send(Method::POST, "/api/v1/products/1", None, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn temp_files_are_unique_and_removed() {
        let first = TempFile::with_contents("[]");
        let second = TempFile::new();
        assert_ne!(first.path(), second.path());

        let path = first.path().to_path_buf();
        drop(first);
        assert!(!path.exists());
    }
}
