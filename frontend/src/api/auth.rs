use reqwest::{Method, StatusCode};

use super::{
    client::ApiClient,
    types::{ApiError, AuthSession, AuthUser, RecoverRequest, UpdatePasswordRequest, VerifyOtpRequest},
};

const RECOVERY_OTP_TYPE: &str = "recovery";

impl ApiClient {
    /// Asks the identity service to mail a recovery code for `email`.
    pub async fn request_password_recovery(&self, email: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/auth/v1/recover")
            .await
            .json(&RecoverRequest {
                email: email.to_string(),
            });
        let response = self.send(builder).await?;
        Self::expect_success(response).await
    }

    /// Exchanges a recovery code for a session. The access token is kept on
    /// the client for the follow-up password update.
    pub async fn verify_recovery_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<AuthSession, ApiError> {
        let builder = self
            .request(Method::POST, "/auth/v1/verify")
            .await
            .json(&VerifyOtpRequest {
                kind: RECOVERY_OTP_TYPE.to_string(),
                email: email.to_string(),
                token: code.to_string(),
            });
        let response = self.send(builder).await?;
        let session: AuthSession = Self::parse_json(response).await?;
        self.set_access_token(Some(session.access_token.clone()));
        Ok(session)
    }

    pub async fn update_password(&self, new_password: &str) -> Result<AuthUser, ApiError> {
        let token = self.bearer_token()?;
        let builder = self
            .request(Method::PUT, "/auth/v1/user")
            .await
            .bearer_auth(token)
            .json(&UpdatePasswordRequest {
                password: new_password.to_string(),
            });
        let response = self.send(builder).await?;
        Self::parse_json(response).await
    }

    /// User behind the current access token; `None` when there is no token
    /// or the service rejects it.
    pub async fn current_user(&self) -> Result<Option<AuthUser>, ApiError> {
        let Some(token) = self.access_token() else {
            return Ok(None);
        };
        let builder = self
            .request(Method::GET, "/auth/v1/user")
            .await
            .bearer_auth(token);
        let response = self.send(builder).await?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Self::parse_json(response).await.map(Some),
        }
    }
}
