use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, SendVerificationCodeRequest, SuccessResponse},
};
use crate::reset::VerificationCodeRecord;

const CODES_PATH: &str = "/rest/v1/verification_codes";
const SEND_CODE_FUNCTION_PATH: &str = "/functions/v1/send-verification-code";

fn eq_filter(value: &str) -> String {
    format!("eq.{}", value)
}

impl ApiClient {
    pub async fn insert_verification_code(
        &self,
        record: &VerificationCodeRecord,
    ) -> Result<VerificationCodeRecord, ApiError> {
        let builder = self
            .request(Method::POST, CODES_PATH)
            .await
            .header("Prefer", "return=representation")
            .json(record);
        let response = self.send(builder).await?;
        let mut rows: Vec<VerificationCodeRecord> = Self::parse_json(response).await?;
        if rows.is_empty() {
            return Err(ApiError::unknown("Verification code was not stored"));
        }
        Ok(rows.swap_remove(0))
    }

    /// Newest record matching both `email` and `code`.
    pub async fn find_verification_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<VerificationCodeRecord>, ApiError> {
        let builder = self.request(Method::GET, CODES_PATH).await.query(&[
            ("select", "*".to_string()),
            ("email", eq_filter(email)),
            ("code", eq_filter(code)),
            ("order", "created_at.desc".to_string()),
            ("limit", "1".to_string()),
        ]);
        let response = self.send(builder).await?;
        let rows: Vec<VerificationCodeRecord> = Self::parse_json(response).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn delete_verification_codes(&self, email: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::DELETE, CODES_PATH)
            .await
            .query(&[("email", eq_filter(email))]);
        let response = self.send(builder).await?;
        Self::expect_success(response).await
    }

    pub async fn send_verification_code_email(
        &self,
        email: &str,
        code: &str,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, SEND_CODE_FUNCTION_PATH)
            .await
            .json(&SendVerificationCodeRequest {
                email: email.to_string(),
                code: code.to_string(),
            });
        let response = self.send(builder).await?;
        let body: SuccessResponse = Self::parse_json(response).await?;
        if body.success {
            Ok(())
        } else {
            Err(ApiError::unknown("Failed to send verification code"))
        }
    }
}
