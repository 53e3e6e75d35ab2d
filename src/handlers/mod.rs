// handlers/mod.rs - Handler tiers
//
// Public (no token) → Protected (shared-secret token checked by middleware)
pub mod protected;
pub mod public;

use crate::error::{ApiError, INVALID_ID};

/// Path ids are plain integers; anything else is a 400.
pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::bad_request(INVALID_ID))
}
