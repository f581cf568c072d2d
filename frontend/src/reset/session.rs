use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResetStep {
    #[default]
    Email,
    Code,
    Password,
    Success,
}

impl ResetStep {
    pub fn next(self) -> Option<Self> {
        match self {
            ResetStep::Email => Some(ResetStep::Code),
            ResetStep::Code => Some(ResetStep::Password),
            ResetStep::Password => Some(ResetStep::Success),
            ResetStep::Success => None,
        }
    }

    /// Steps reachable through the "back" button.
    pub fn previous(self) -> Option<Self> {
        match self {
            ResetStep::Code => Some(ResetStep::Email),
            ResetStep::Password => Some(ResetStep::Code),
            ResetStep::Email | ResetStep::Success => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResetStep::Email => "email",
            ResetStep::Code => "code",
            ResetStep::Password => "password",
            ResetStep::Success => "success",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            ResetStep::Email => "Failed to send verification code",
            ResetStep::Code => "Invalid or expired code",
            ResetStep::Password => "Failed to reset password",
            ResetStep::Success => "Something went wrong",
        }
    }
}

impl fmt::Display for ResetStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory state of one pass through the reset flow.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResetSession {
    pub email: String,
    pub code: String,
    pub new_password: String,
    pub confirm_password: String,
    pub step: ResetStep,
    pub error: Option<String>,
    pub is_loading: bool,
}

impl ResetSession {
    pub fn is_initial(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Debug for ResetSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetSession")
            .field("email", &self.email)
            .field("code", &self.code)
            .field("new_password", &mask(&self.new_password))
            .field("confirm_password", &mask(&self.confirm_password))
            .field("step", &self.step)
            .field("error", &self.error)
            .field("is_loading", &self.is_loading)
            .finish()
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        "<empty>".into()
    } else {
        format!("*** (len={})", secret.chars().count())
    }
}
