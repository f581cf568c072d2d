pub mod health;
pub mod verification_code;

pub use health::*;
pub use verification_code::*;

use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
