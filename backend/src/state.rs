use std::sync::Arc;

use crate::{config::Config, utils::email::VerificationMailer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mailer: Arc<dyn VerificationMailer>,
}

impl AppState {
    pub fn new(config: Config, mailer: Arc<dyn VerificationMailer>) -> Self {
        Self { config, mailer }
    }
}
