use super::repository::{access_token_from_fragment, ResetPasswordRepository};
use crate::api::{ApiClient, ApiError};
use crate::reset::{
    policy::LINK_PASSWORD_MIN_LENGTH, validation::validate_new_password, ResetError, ResetStep,
};
use leptos::*;
use std::rc::Rc;

pub const INVALID_SESSION_MESSAGE: &str = "Invalid or expired reset session.";
pub const REDIRECT_DELAY_MS: u32 = 3_000;
const FORGOT_PASSWORD_PATH: &str = "/forgot-password";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Checking,
    Valid,
    Invalid,
}

#[derive(Clone, Copy)]
pub struct ResetPasswordViewModel {
    pub new_password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
    pub session: RwSignal<SessionState>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<bool>,
    pub check_action: Action<Option<String>, Result<bool, ApiError>>,
    pub submit_action: Action<String, Result<(), ApiError>>,
}

impl ResetPasswordViewModel {
    /// Checks the password pair locally and dispatches the update when it
    /// passes.
    pub fn submit(&self) {
        if self.submit_action.pending().get_untracked() {
            return;
        }
        let new_password = self.new_password.get_untracked();
        let confirm_password = self.confirm_password.get_untracked();
        match validate_new_password(&new_password, &confirm_password, LINK_PASSWORD_MIN_LENGTH) {
            Ok(()) => {
                self.error.set(None);
                self.submit_action.dispatch(new_password);
            }
            Err(err) => self.error.set(Some(err.to_string())),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn link_fragment() -> Option<String> {
    web_sys::window().and_then(|w| w.location().hash().ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn link_fragment() -> Option<String> {
    None
}

/// Logs a failed navigation; returns whether the redirect went through.
fn redirect_succeeded<E: std::fmt::Debug>(result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::warn!("redirect to {} failed: {:?}", FORGOT_PASSWORD_PATH, err);
            false
        }
    }
}

fn redirect_to_forgot_password() {
    spawn_local(async {
        gloo_timers::future::TimeoutFuture::new(REDIRECT_DELAY_MS).await;
        match web_sys::window() {
            Some(window) => {
                redirect_succeeded(window.location().set_href(FORGOT_PASSWORD_PATH));
            }
            None => log::warn!("no window to redirect to {}", FORGOT_PASSWORD_PATH),
        }
    });
}

/// Text shown when the password update is rejected. A response without a
/// message falls back to the generic reset failure.
fn update_failure_message(err: ApiError) -> String {
    ResetError::from(err).user_message(ResetStep::Password)
}

pub fn use_reset_password_view_model() -> ResetPasswordViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = ResetPasswordRepository::new_with_client(Rc::new(api));

    let new_password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let session = create_rw_signal(SessionState::default());
    let error = create_rw_signal(None::<String>);
    let success = create_rw_signal(false);

    let repo_for_check = repository.clone();
    let check_action = create_action(move |link_token: &Option<String>| {
        let repo = repo_for_check.clone();
        let link_token = link_token.clone();
        async move { repo.has_recovery_session(link_token).await }
    });

    let repo_for_submit = repository.clone();
    let submit_action = create_action(move |value: &String| {
        let repo = repo_for_submit.clone();
        let value = value.clone();
        async move { repo.update_password(value).await }
    });

    // Runs once on mount in the browser.
    create_effect(move |_| {
        let token = link_fragment().and_then(|hash| access_token_from_fragment(&hash));
        check_action.dispatch(token);
    });

    create_effect(move |_| {
        if let Some(result) = check_action.value().get() {
            match result {
                Ok(true) => session.set(SessionState::Valid),
                Ok(false) | Err(_) => {
                    if let Err(err) = result {
                        log::warn!("recovery session check failed: {}", err);
                    }
                    session.set(SessionState::Invalid);
                    error.set(Some(INVALID_SESSION_MESSAGE.to_string()));
                    redirect_to_forgot_password();
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = submit_action.value().get() {
            match result {
                Ok(()) => {
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    error.set(None);
                    success.set(true);
                }
                Err(err) => {
                    log::warn!("password update failed: {}", err);
                    error.set(Some(update_failure_message(err)));
                    success.set(false);
                }
            }
        }
    });

    ResetPasswordViewModel {
        new_password,
        confirm_password,
        session,
        error,
        success,
        check_action,
        submit_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::MockServer;
    use crate::test_support::ssr::{with_api_context, with_runtime};

    #[test]
    fn reset_password_view_model_defaults() {
        with_runtime(|| {
            let vm = use_reset_password_view_model();
            assert_eq!(vm.session.get(), SessionState::Checking);
            assert!(vm.error.get().is_none());
            assert!(!vm.success.get());
            assert!(vm.new_password.get().is_empty());
        });
    }

    #[test]
    fn mismatched_passwords_are_rejected_locally() {
        let server = MockServer::start();
        let client = ApiClient::new_with_base_url(server.url("/project"));
        with_api_context(client, || {
            let vm = use_reset_password_view_model();
            vm.new_password.set("password-1".into());
            vm.confirm_password.set("password-2".into());
            vm.submit();
            assert_eq!(vm.error.get().as_deref(), Some("Passwords do not match"));
            assert!(vm.submit_action.input().get().is_none());
        });
        assert!(server.received().is_empty());
    }

    #[test]
    fn failed_redirect_is_reported() {
        assert!(redirect_succeeded::<&str>(Ok(())));
        assert!(!redirect_succeeded(Err("navigation blocked")));
    }

    #[test]
    fn update_failure_without_message_uses_fallback() {
        let blank = ApiError::from_response(500, &serde_json::json!({}));
        assert_eq!(update_failure_message(blank), "Failed to reset password");

        let weak = ApiError::from_response(
            422,
            &serde_json::json!({ "msg": "Password should be at least 6 characters" }),
        );
        assert_eq!(
            update_failure_message(weak),
            "Password should be at least 6 characters"
        );
    }

    #[test]
    fn link_page_requires_eight_characters() {
        with_runtime(|| {
            let vm = use_reset_password_view_model();
            vm.new_password.set("abcdefg".into());
            vm.confirm_password.set("abcdefg".into());
            vm.submit();
            assert_eq!(
                vm.error.get().as_deref(),
                Some("Password must be at least 8 characters long")
            );
        });
    }
}
