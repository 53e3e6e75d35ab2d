use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date layout used by the `expiration` field (DD/MM/YYYY)
pub const EXPIRATION_FORMAT: &str = "%d/%m/%Y";

/// A catalog product as stored in the flat file and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned by the repository; ignored on input
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    pub code_value: String,
    #[serde(default)]
    pub is_published: bool,
    pub expiration: String,
    pub price: f64,
}

/// Partial update payload. Absent fields keep their stored value, except
/// `is_published` which always replaces the stored flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_value: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl From<Product> for ProductUpdateRequest {
    fn from(product: Product) -> Self {
        Self {
            name: Some(product.name),
            quantity: Some(product.quantity),
            code_value: Some(product.code_value),
            is_published: product.is_published,
            expiration: Some(product.expiration),
            price: Some(product.price),
        }
    }
}

/// Identifier for the next appended product. Ids are never reused, so a
/// collection with contiguous ids 1..=n gets n + 1.
pub fn next_id(products: &[Product]) -> i64 {
    products.iter().map(|p| p.id).max().unwrap_or(0) + 1
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid product data")]
    InvalidData,

    #[error("invalid expiration date format")]
    InvalidExpirationFormat,

    #[error("expiration date must be after current date")]
    ExpiredDate,
}

impl Product {
    /// Checks the fields a full payload must carry, then the expiration date.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() || self.code_value.trim().is_empty() {
            return Err(ValidationError::InvalidData);
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ValidationError::InvalidData);
        }
        validate_expiration(&self.expiration, now)
    }
}

impl ProductUpdateRequest {
    /// Only an expiration that is actually supplied gets checked.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        match self.expiration.as_deref() {
            Some(date) if !date.is_empty() => validate_expiration(date, now),
            _ => Ok(()),
        }
    }
}

/// Parses a DD/MM/YYYY date; the start of that day (UTC) must be later than `now`.
pub fn validate_expiration(date: &str, now: DateTime<Utc>) -> Result<(), ValidationError> {
    if !is_zero_padded(date) {
        return Err(ValidationError::InvalidExpirationFormat);
    }
    let parsed = NaiveDate::parse_from_str(date, EXPIRATION_FORMAT)
        .map_err(|_| ValidationError::InvalidExpirationFormat)?;

    let start_of_day = parsed
        .and_hms_opt(0, 0, 0)
        .ok_or(ValidationError::InvalidExpirationFormat)?
        .and_utc();

    if start_of_day < now {
        return Err(ValidationError::ExpiredDate);
    }
    Ok(())
}

/// chrono's `%d` and `%m` also accept a single digit
fn is_zero_padded(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}
