//! Request and response bodies for the HTTP handlers.

use serde::{Deserialize, Serialize};

pub mod verification_code;

pub use verification_code::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}
