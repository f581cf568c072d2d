use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::sync::Arc;
use thiserror::Error;

use crate::config::{Config, SmtpConfig};

pub const VERIFICATION_SUBJECT: &str = "Your ReStock Password Reset Code";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
    #[error("mail task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Delivers password reset codes to users.
#[async_trait]
pub trait VerificationMailer: Send + Sync {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), MailError>;
}

pub fn verification_body(code: &str) -> String {
    format!(
        r#"
We received a request to reset your ReStock password.

Your verification code is: {}

The code expires in 30 minutes.

If you did not request a password reset, you can ignore this email.

---
ReStock
"#,
        code
    )
}

pub struct SmtpMailer {
    transport: SmtpTransport,
    from_address: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let transport = if config.username.is_empty() {
            SmtpTransport::builder_dangerous(&config.host)
                .port(config.port)
                .build()
        } else {
            let creds = Credentials::new(config.username.clone(), config.password.clone());
            SmtpTransport::relay(&config.host)?
                .port(config.port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            transport,
            from_address: config.from_address.parse()?,
        })
    }

    fn build_message(&self, email: &str, code: &str) -> Result<Message, MailError> {
        Ok(Message::builder()
            .from(self.from_address.clone())
            .to(email.parse()?)
            .subject(VERIFICATION_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(verification_body(code))?)
    }
}

#[async_trait]
impl VerificationMailer for SmtpMailer {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), MailError> {
        let message = self.build_message(email, code)?;
        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&message)).await??;
        tracing::info!(to = %email, "verification code email sent");
        Ok(())
    }
}

/// Development fallback used when no SMTP server is configured.
pub struct LogMailer;

#[async_trait]
impl VerificationMailer for LogMailer {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), MailError> {
        tracing::info!(to = %email, code = %code, "verification code (mail delivery disabled)");
        Ok(())
    }
}

pub fn mailer_from_config(config: &Config) -> anyhow::Result<Arc<dyn VerificationMailer>> {
    match &config.smtp {
        Some(smtp) if !config.smtp_skip_send => Ok(Arc::new(SmtpMailer::new(smtp)?)),
        _ => Ok(Arc::new(LogMailer)),
    }
}
