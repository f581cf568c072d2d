use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    error::AppError,
    models::{SendVerificationCodePayload, SuccessResponse, VerificationCodeRequest},
    state::AppState,
};

/// Mails a password reset code that the client already stored.
pub async fn send_verification_code(
    State(state): State<AppState>,
    payload: Result<Json<SendVerificationCodePayload>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(payload) = payload?;
    let request = VerificationCodeRequest::try_from(payload)?;

    tracing::debug!(to = %request.email, "sending verification code");
    state
        .mailer
        .send_verification_code(&request.email, &request.code)
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}
