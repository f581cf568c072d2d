//! Password reset flow: the step state machine, its local validation rules
//! and the services it delegates credential changes to.

pub mod code_store;
pub mod error;
pub mod flow;
pub mod policy;
pub mod service;
pub mod session;
pub mod validation;

pub use code_store::{
    generate_code, is_code_valid, Clock, CodeMailer, CodeStore, MemoryCodeStore, SystemClock,
    VerificationCodeRecord,
};
pub use error::ResetError;
pub use flow::{PasswordResetFlow, PendingRequest, ResetCall};
pub use policy::{ResetMode, ResetPolicy};
pub use service::{dispatch, CodeTableResetService, IdentityService, OtpResetService, ResetService};
pub use session::{ResetSession, ResetStep};
