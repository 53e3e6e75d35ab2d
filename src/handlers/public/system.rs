use axum::response::Json;
use serde_json::{json, Value};

/// GET / - service information
pub async fn root() -> Json<Value> {
    Json(json!({
        "data": {
            "name": "Product Catalog API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "ping": "/ping (public)",
                "list": "GET /api/v1/products/all (public)",
                "show": "GET /api/v1/products/:id (public)",
                "search": "GET /api/v1/products/search?priceGt=N (public)",
                "create": "POST /api/v1/products/new (token)",
                "update": "PUT|PATCH /api/v1/products/:id (token)",
                "delete": "DELETE /api/v1/products/:id (token)",
            }
        }
    }))
}

/// GET /ping - liveness probe
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /panic - deliberately panics to exercise the recovery middleware
pub async fn panic_probe() -> &'static str {
    panic!("oh no!")
}
