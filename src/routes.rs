use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;
use crate::handlers::{protected, public};
use crate::state::AppState;

pub const API_BASE_PATH: &str = "/api/v1";

/// Full application router: probes at the root, products under `/api/v1`
pub fn app(state: AppState, api: &ApiConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(public::root))
        .route("/ping", get(public::ping))
        .route("/panic", get(public::panic_probe))
        .nest(API_BASE_PATH, product_routes(state))
        .layer(middleware::from_fn(crate::middleware::recover_panic))
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes));

    if api.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http())
}

fn product_routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/products/all", get(public::products_all))
        .route("/products/search", get(public::products_search))
        .route("/products/:id", get(public::product_get));

    // Layered per method router so unmatched methods still answer 405
    let token_guard =
        middleware::from_fn_with_state(state.clone(), crate::middleware::require_token);
    let protected_routes = Router::new()
        .route(
            "/products/new",
            post(protected::product_create).route_layer(token_guard.clone()),
        )
        .route(
            "/products/:id",
            put(protected::product_put)
                .patch(protected::product_patch)
                .delete(protected::product_delete)
                .route_layer(token_guard),
        );

    public_routes.merge(protected_routes).with_state(state)
}
