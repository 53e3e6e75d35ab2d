pub mod auth;
pub mod recovery;
pub mod response;

pub use auth::{require_token, TOKEN_HEADER};
pub use recovery::recover_panic;
pub use response::{ApiResponse, ApiResult};
