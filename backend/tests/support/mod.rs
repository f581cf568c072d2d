#![allow(dead_code)]
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use restock_backend::{
    app,
    config::Config,
    state::AppState,
    utils::email::{MailError, VerificationMailer},
};

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("lock sent").clone()
    }
}

#[async_trait]
impl VerificationMailer for RecordingMailer {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .expect("lock sent")
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

/// Fails every send the way an unreachable relay would.
pub struct FailingMailer;

#[async_trait]
impl VerificationMailer for FailingMailer {
    async fn send_verification_code(&self, _email: &str, _code: &str) -> Result<(), MailError> {
        let err = "invalid"
            .parse::<lettre::Address>()
            .expect_err("address must be invalid");
        Err(MailError::from(err))
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|_| None).expect("default config")
}

pub fn test_config_with_origins(origins: &str) -> Config {
    let origins = origins.to_string();
    Config::from_lookup(move |key| (key == "CORS_ALLOW_ORIGINS").then(|| origins.clone()))
        .expect("config with origins")
}

pub fn test_app(mailer: Arc<dyn VerificationMailer>) -> Router {
    app(AppState::new(test_config(), mailer))
}
