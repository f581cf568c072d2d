use async_trait::async_trait;
use std::rc::Rc;

use crate::api::ApiClient;
use crate::reset::{
    CodeMailer, CodeStore, CodeTableResetService, IdentityService, OtpResetService, ResetError,
    ResetMode, ResetPolicy, ResetService, VerificationCodeRecord,
};

/// REST-backed collaborators of the reset flow. One handle serves as the
/// identity service, the code table and the code mailer.
#[derive(Clone)]
pub struct ForgotPasswordRepository {
    client: Rc<ApiClient>,
}

impl ForgotPasswordRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Service for the configured code mechanism. Exactly one mechanism
    /// backs a flow instance.
    pub fn reset_service(&self, mode: ResetMode, policy: ResetPolicy) -> Rc<dyn ResetService> {
        match mode {
            ResetMode::Otp => Rc::new(OtpResetService::new(self.clone())),
            ResetMode::CodeTable => Rc::new(CodeTableResetService::new(
                self.clone(),
                self.clone(),
                self.clone(),
                policy,
            )),
        }
    }
}

#[async_trait(?Send)]
impl IdentityService for ForgotPasswordRepository {
    async fn request_code(&self, email: &str) -> Result<(), ResetError> {
        self.client
            .request_password_recovery(email)
            .await
            .map_err(ResetError::from)
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<(), ResetError> {
        self.client
            .verify_recovery_code(email, code)
            .await
            .map(|_| ())
            .map_err(ResetError::from)
    }

    async fn update_password(&self, new_password: &str) -> Result<(), ResetError> {
        self.client
            .update_password(new_password)
            .await
            .map(|_| ())
            .map_err(ResetError::from)
    }
}

#[async_trait(?Send)]
impl CodeStore for ForgotPasswordRepository {
    async fn store_code(
        &self,
        record: VerificationCodeRecord,
    ) -> Result<VerificationCodeRecord, ResetError> {
        Ok(self.client.insert_verification_code(&record).await?)
    }

    async fn lookup_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<VerificationCodeRecord>, ResetError> {
        Ok(self.client.find_verification_code(email, code).await?)
    }

    async fn delete_code(&self, email: &str) -> Result<(), ResetError> {
        Ok(self.client.delete_verification_codes(email).await?)
    }
}

#[async_trait(?Send)]
impl CodeMailer for ForgotPasswordRepository {
    async fn send_code(&self, email: &str, code: &str) -> Result<(), ResetError> {
        Ok(self.client.send_verification_code_email(email, code).await?)
    }
}
