use super::error::ResetError;
use super::policy::ResetPolicy;
use super::service::{dispatch, ResetService};
use super::session::{ResetSession, ResetStep};
use super::validation::{
    parse_pasted_code, sanitize_code_input, validate_code, validate_email, validate_new_password,
};

/// External call requested by a step submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResetCall {
    SendCode {
        email: String,
    },
    VerifyCode {
        email: String,
        code: String,
    },
    UpdatePassword {
        email: String,
        code: String,
        new_password: String,
    },
}

impl ResetCall {
    pub fn step(&self) -> ResetStep {
        match self {
            ResetCall::SendCode { .. } => ResetStep::Email,
            ResetCall::VerifyCode { .. } => ResetStep::Code,
            ResetCall::UpdatePassword { .. } => ResetStep::Password,
        }
    }
}

/// A call handed out by [`PasswordResetFlow::begin_submit`]. It must be
/// returned through [`PasswordResetFlow::complete`] with the outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    generation: u64,
    call: ResetCall,
}

impl PendingRequest {
    pub fn call(&self) -> &ResetCall {
        &self.call
    }

    pub fn step(&self) -> ResetStep {
        self.call.step()
    }
}

/// Step state machine for the reset flow.
///
/// Submitting is split in two halves so the same controller can be driven
/// by an awaited call ([`submit`](Self::submit)) or by a UI action whose
/// result arrives later: `begin_submit` validates locally and raises the
/// loading flag, `complete` always clears it and applies the outcome.
#[derive(Clone, Debug, Default)]
pub struct PasswordResetFlow {
    session: ResetSession,
    policy: ResetPolicy,
    generation: u64,
}

impl PasswordResetFlow {
    pub fn new(policy: ResetPolicy) -> Self {
        Self {
            session: ResetSession::default(),
            policy,
            generation: 0,
        }
    }

    pub fn session(&self) -> &ResetSession {
        &self.session
    }

    pub fn policy(&self) -> ResetPolicy {
        self.policy
    }

    pub fn step(&self) -> ResetStep {
        self.session.step
    }

    pub fn can_submit(&self) -> bool {
        !self.session.is_loading && self.session.step != ResetStep::Success
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.session.email = value.into();
    }

    pub fn set_code_input(&mut self, raw: &str) {
        self.session.code = sanitize_code_input(raw, self.policy.code_length);
    }

    /// Edits one cell of the digit grid. Anything but a single digit (or an
    /// empty string, which clears the cell) is ignored.
    pub fn set_code_digit(&mut self, index: usize, raw: &str) -> bool {
        let len = self.policy.code_length;
        if index >= len {
            return false;
        }
        let digit = match raw.chars().collect::<Vec<_>>().as_slice() {
            [] => None,
            [c] if c.is_ascii_digit() => Some(*c),
            _ => return false,
        };
        let mut cells: Vec<Option<char>> = self.session.code.chars().map(Some).collect();
        cells.resize(len, None);
        cells[index] = digit;
        self.session.code = cells.into_iter().flatten().collect();
        true
    }

    pub fn paste_code(&mut self, raw: &str) -> bool {
        match parse_pasted_code(raw, self.policy.code_length) {
            Some(code) => {
                self.session.code = code;
                true
            }
            None => false,
        }
    }

    pub fn set_new_password(&mut self, value: impl Into<String>) {
        self.session.new_password = value.into();
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.session.confirm_password = value.into();
    }

    /// Validates the current step. On success the session enters the
    /// loading state and the call to perform is returned; on failure the
    /// error is recorded and nothing is returned. A submission while a call
    /// is already in flight is dropped.
    pub fn begin_submit(&mut self) -> Option<PendingRequest> {
        if self.session.is_loading {
            log::debug!("reset step {} already in flight", self.session.step);
            return None;
        }
        self.session.error = None;

        match self.call_for_current_step() {
            Ok(call) => {
                self.session.is_loading = true;
                log::debug!("reset step {} submitted", call.step());
                Some(PendingRequest {
                    generation: self.generation,
                    call,
                })
            }
            Err(err) => {
                log::debug!("reset step {} rejected: {}", self.session.step, err);
                self.session.error = Some(err.to_string());
                None
            }
        }
    }

    fn call_for_current_step(&self) -> Result<ResetCall, ResetError> {
        let session = &self.session;
        match session.step {
            ResetStep::Email => {
                validate_email(&session.email).map(|email| ResetCall::SendCode { email })
            }
            ResetStep::Code => {
                validate_code(&session.code, self.policy.code_length)?;
                Ok(ResetCall::VerifyCode {
                    email: session.email.trim().to_string(),
                    code: session.code.clone(),
                })
            }
            ResetStep::Password => {
                validate_new_password(
                    &session.new_password,
                    &session.confirm_password,
                    self.policy.password_min_length,
                )?;
                Ok(ResetCall::UpdatePassword {
                    email: session.email.trim().to_string(),
                    code: session.code.clone(),
                    new_password: session.new_password.clone(),
                })
            }
            ResetStep::Success => Err(ResetError::State {
                action: "submit",
                current: ResetStep::Success,
            }),
        }
    }

    /// Applies the outcome of a call obtained from `begin_submit`. Requests
    /// issued before the last `close` are discarded.
    pub fn complete(&mut self, request: PendingRequest, outcome: Result<(), ResetError>) {
        if request.generation != self.generation {
            log::debug!("discarding stale {} result", request.step());
            return;
        }
        self.session.is_loading = false;

        let step = request.step();
        if step != self.session.step {
            let err = ResetError::State {
                action: "complete a request",
                current: self.session.step,
            };
            self.session.error = Some(err.to_string());
            return;
        }

        match outcome {
            Ok(()) => {
                if let Some(next) = step.next() {
                    log::debug!("reset step {} -> {}", step, next);
                    self.session.step = next;
                }
                self.session.error = None;
            }
            Err(err) => {
                log::warn!("reset step {} failed: {}", step, err);
                self.session.error = Some(err.user_message(step));
            }
        }
    }

    /// Runs the current step against `service` and returns the resulting
    /// step.
    pub async fn submit<S>(&mut self, service: &S) -> ResetStep
    where
        S: ResetService + ?Sized,
    {
        if let Some(request) = self.begin_submit() {
            let outcome = dispatch(service, request.call()).await;
            self.complete(request, outcome);
        }
        self.session.step
    }

    pub fn back(&mut self) -> Result<(), ResetError> {
        let current = self.session.step;
        let previous = current
            .previous()
            .filter(|_| !self.session.is_loading)
            .ok_or(ResetError::State {
                action: "go back",
                current,
            })?;
        self.session.step = previous;
        self.session.error = None;
        Ok(())
    }

    /// Clears every field and returns to the email step.
    pub fn close(&mut self) {
        self.session = ResetSession::default();
        self.generation = self.generation.wrapping_add(1);
    }
}
