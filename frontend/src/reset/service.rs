use async_trait::async_trait;

use super::code_store::{
    generate_code, is_code_valid, Clock, CodeMailer, CodeStore, SystemClock,
    VerificationCodeRecord,
};
use super::error::ResetError;
use super::flow::ResetCall;
use super::policy::ResetPolicy;

const INVALID_CODE: &str = "Invalid or expired code";

/// External side of the flow: one call per step.
#[async_trait(?Send)]
pub trait ResetService {
    async fn send_code(&self, email: &str) -> Result<(), ResetError>;
    async fn verify_code(&self, email: &str, code: &str) -> Result<(), ResetError>;
    async fn update_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), ResetError>;
}

pub async fn dispatch<S>(service: &S, call: &ResetCall) -> Result<(), ResetError>
where
    S: ResetService + ?Sized,
{
    match call {
        ResetCall::SendCode { email } => service.send_code(email).await,
        ResetCall::VerifyCode { email, code } => service.verify_code(email, code).await,
        ResetCall::UpdatePassword {
            email,
            code,
            new_password,
        } => service.update_password(email, code, new_password).await,
    }
}

/// Hosted identity service: issues and verifies one-time codes and owns
/// the credentials. `update_password` relies on the session established by
/// a successful `verify_code`.
#[async_trait(?Send)]
pub trait IdentityService {
    async fn request_code(&self, email: &str) -> Result<(), ResetError>;
    async fn verify_code(&self, email: &str, code: &str) -> Result<(), ResetError>;
    async fn update_password(&self, new_password: &str) -> Result<(), ResetError>;
}

/// Codes issued and checked by the identity service itself.
pub struct OtpResetService<I> {
    identity: I,
}

impl<I: IdentityService> OtpResetService<I> {
    pub fn new(identity: I) -> Self {
        Self { identity }
    }
}

#[async_trait(?Send)]
impl<I: IdentityService> ResetService for OtpResetService<I> {
    async fn send_code(&self, email: &str) -> Result<(), ResetError> {
        self.identity.request_code(email).await
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<(), ResetError> {
        self.identity.verify_code(email, code).await
    }

    async fn update_password(
        &self,
        _email: &str,
        _code: &str,
        new_password: &str,
    ) -> Result<(), ResetError> {
        self.identity.update_password(new_password).await
    }
}

/// Codes kept in a side table with an explicit expiry and mailed by a
/// separate function. The identity service only performs the final update.
pub struct CodeTableResetService<I, S, M, C = SystemClock> {
    identity: I,
    store: S,
    mailer: M,
    clock: C,
    policy: ResetPolicy,
}

impl<I, S, M> CodeTableResetService<I, S, M, SystemClock>
where
    I: IdentityService,
    S: CodeStore,
    M: CodeMailer,
{
    pub fn new(identity: I, store: S, mailer: M, policy: ResetPolicy) -> Self {
        Self::with_clock(identity, store, mailer, SystemClock, policy)
    }
}

impl<I, S, M, C> CodeTableResetService<I, S, M, C>
where
    I: IdentityService,
    S: CodeStore,
    M: CodeMailer,
    C: Clock,
{
    pub fn with_clock(identity: I, store: S, mailer: M, clock: C, policy: ResetPolicy) -> Self {
        Self {
            identity,
            store,
            mailer,
            clock,
            policy,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn valid_record(
        &self,
        email: &str,
        code: &str,
    ) -> Result<VerificationCodeRecord, ResetError> {
        let record = self
            .store
            .lookup_code(email, code)
            .await?
            .ok_or_else(|| ResetError::service(INVALID_CODE))?;
        if !is_code_valid(&record, self.clock.now()) {
            log::debug!("verification code for {} expired at {}", email, record.expires_at);
            return Err(ResetError::service(INVALID_CODE));
        }
        Ok(record)
    }
}

#[async_trait(?Send)]
impl<I, S, M, C> ResetService for CodeTableResetService<I, S, M, C>
where
    I: IdentityService,
    S: CodeStore,
    M: CodeMailer,
    C: Clock,
{
    async fn send_code(&self, email: &str) -> Result<(), ResetError> {
        // A resend retires every earlier code for the address.
        self.store.delete_code(email).await?;
        let code = generate_code(self.policy.code_length);
        let record =
            VerificationCodeRecord::issue(email, code, self.clock.now(), self.policy.code_ttl);
        self.store.store_code(record.clone()).await?;
        self.mailer.send_code(&record.email, &record.code).await
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<(), ResetError> {
        self.valid_record(email, code).await.map(|_| ())
    }

    async fn update_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), ResetError> {
        // The code may have expired while the user was typing the password.
        self.valid_record(email, code).await?;
        self.identity.update_password(new_password).await?;
        if let Err(err) = self.store.delete_code(email).await {
            log::warn!("password updated but verification code cleanup failed: {}", err);
        }
        Ok(())
    }
}
