pub mod auth;
pub mod extract;
pub mod response;

pub use auth::require_bearer;
pub use extract::{ApiJson, ApiPath};
pub use response::{ApiResponse, ApiResult};
