use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;
use chrono::Utc;

use crate::domain::{Product, ProductUpdateRequest};
use crate::error::{ApiError, INVALID_DATA};
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!("Rejected product payload: {}", rejection.body_text());
        ApiError::bad_request(INVALID_DATA)
    })
}

/// POST /api/v1/products/new
pub async fn product_create(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> ApiResult<Product> {
    let product = decode(payload)?;
    product.validate(Utc::now())?;

    let created = state.products.create(product).await?;
    tracing::info!("Created product {} ({})", created.id, created.code_value);
    Ok(ApiResponse::created(created))
}

/// PUT /api/v1/products/:id - replace with a complete payload
pub async fn product_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Product>, JsonRejection>,
) -> ApiResult<Product> {
    let id = parse_id(&id)?;
    let product = decode(payload)?;
    product.validate(Utc::now())?;

    let updated = state.products.update(id, product.into()).await?;
    Ok(ApiResponse::success(updated))
}

/// PATCH /api/v1/products/:id - merge the supplied fields
pub async fn product_patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductUpdateRequest>, JsonRejection>,
) -> ApiResult<Product> {
    let id = parse_id(&id)?;
    let changes = decode(payload)?;
    changes.validate(Utc::now())?;

    let updated = state.products.update(id, changes).await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/v1/products/:id
pub async fn product_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.products.delete(id).await?;
    tracing::info!("Deleted product {}", id);
    Ok(ApiResponse::no_content())
}
