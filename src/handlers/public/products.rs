use axum::extract::{rejection::QueryRejection, Path, Query, State};
use serde::Deserialize;

use crate::domain::Product;
use crate::error::{ApiError, INVALID_PRICE};
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "priceGt")]
    pub price_gt: Option<String>,
}

/// GET /api/v1/products/all - every product in stored order
pub async fn products_all(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    Ok(ApiResponse::success(state.products.get_all().await))
}

/// GET /api/v1/products/:id
pub async fn product_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    let id = parse_id(&id)?;
    let product = state.products.get_by_id(id).await?;
    Ok(ApiResponse::success(product))
}

/// GET /api/v1/products/search?priceGt=N - products priced strictly above N
pub async fn products_search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<Product>> {
    let price = query
        .ok()
        .and_then(|Query(q)| q.price_gt)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
        .ok_or_else(|| ApiError::bad_request(INVALID_PRICE))?;

    let products = state.products.get_by_price_gt(price).await?;
    Ok(ApiResponse::success(products))
}
