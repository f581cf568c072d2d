use super::view_model::{
    use_reset_password_view_model, ResetPasswordViewModel, SessionState,
};
use crate::components::{
    common::Button,
    error::InlineErrorMessage,
    layout::{ErrorMessage, LoadingSpinner, SuccessMessage},
};
use crate::reset::policy::LINK_PASSWORD_MIN_LENGTH;
use leptos::*;

#[component]
pub fn ResetPasswordPanel() -> impl IntoView {
    let vm = use_reset_password_view_model();
    view! { <ResetPasswordForm vm=vm /> }
}

#[component]
pub(crate) fn ResetPasswordForm(vm: ResetPasswordViewModel) -> impl IntoView {
    let pending = vm.submit_action.pending();
    let error = Signal::derive(move || vm.error.get());

    let password_form = move || {
        view! {
            <form
                class="mt-8 space-y-6"
                on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    vm.submit();
                }
            >
                <div class="space-y-4">
                    <div>
                        <label for="link-new-password" class="block text-sm font-medium text-fg">
                            "New password"
                        </label>
                        <input
                            id="link-new-password"
                            type="password"
                            autocomplete="new-password"
                            class="mt-1 appearance-none rounded-md block w-full px-3 py-2 border border-form-control-border bg-form-control-bg text-form-control-text focus:outline-none focus:ring-2 focus:ring-action-primary-focus sm:text-sm"
                            prop:value=vm.new_password
                            on:input=move |ev| vm.new_password.set(event_target_value(&ev))
                        />
                        <p class="mt-1 text-xs text-fg-muted">
                            {format!("At least {} characters", LINK_PASSWORD_MIN_LENGTH)}
                        </p>
                    </div>
                    <div>
                        <label for="link-confirm-password" class="block text-sm font-medium text-fg">
                            "Confirm password"
                        </label>
                        <input
                            id="link-confirm-password"
                            type="password"
                            autocomplete="new-password"
                            class="mt-1 appearance-none rounded-md block w-full px-3 py-2 border border-form-control-border bg-form-control-bg text-form-control-text focus:outline-none focus:ring-2 focus:ring-action-primary-focus sm:text-sm"
                            prop:value=vm.confirm_password
                            on:input=move |ev| vm.confirm_password.set(event_target_value(&ev))
                        />
                    </div>
                </div>
                <InlineErrorMessage error=error />
                <Button submit=true full_width=true loading=pending>
                    {move || if pending.get() { "Updating..." } else { "Update Password" }}
                </Button>
            </form>
        }
    };

    view! {
        <div class="flex items-center justify-center py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                    "Set new password"
                </h2>
                {move || {
                    if vm.success.get() {
                        return view! {
                            <div class="text-center">
                                <SuccessMessage message="Your password has been updated." />
                                <a href="/login" class="font-medium text-link hover:text-link-hover">
                                    "Continue to login"
                                </a>
                            </div>
                        }
                            .into_view();
                    }
                    match vm.session.get() {
                        SessionState::Checking => view! { <LoadingSpinner /> }.into_view(),
                        SessionState::Invalid => {
                            let message = vm.error.get().unwrap_or_default();
                            view! {
                                <div class="text-center">
                                    <ErrorMessage message=message />
                                    <p class="text-sm text-fg-muted">
                                        "Redirecting to password recovery..."
                                    </p>
                                </div>
                            }
                                .into_view()
                        }
                        SessionState::Valid => password_form().into_view(),
                    }
                }}
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::super::view_model::INVALID_SESSION_MESSAGE;
    use super::*;
    use crate::test_support::ssr::render_to_string;

    fn render_with(prepare: impl FnOnce(&ResetPasswordViewModel) + 'static) -> String {
        render_to_string(move || {
            let vm = use_reset_password_view_model();
            prepare(&vm);
            view! { <ResetPasswordForm vm=vm /> }
        })
    }

    #[test]
    fn shows_spinner_while_checking_session() {
        let html = render_with(|_| {});
        assert!(html.contains("animate-spin"));
        assert!(!html.contains("link-new-password"));
    }

    #[test]
    fn invalid_session_shows_message() {
        let html = render_with(|vm| {
            vm.session.set(SessionState::Invalid);
            vm.error.set(Some(INVALID_SESSION_MESSAGE.to_string()));
        });
        assert!(html.contains(INVALID_SESSION_MESSAGE));
        assert!(html.contains("Redirecting"));
    }

    #[test]
    fn valid_session_renders_password_form() {
        let html = render_with(|vm| vm.session.set(SessionState::Valid));
        assert!(html.contains("link-new-password"));
        assert!(html.contains("link-confirm-password"));
        assert!(html.contains("Update Password"));
    }

    #[test]
    fn success_links_to_login() {
        let html = render_with(|vm| {
            vm.session.set(SessionState::Valid);
            vm.success.set(true);
        });
        assert!(html.contains("Your password has been updated."));
        assert!(html.contains("href=\"/login\""));
    }
}
