use super::view_model::{use_forgot_password_view_model, ForgotPasswordViewModel};
use crate::components::{
    code_input::CodeInput,
    common::{Button, ButtonVariant},
    error::InlineErrorMessage,
};
use crate::reset::ResetStep;
use leptos::*;

pub(super) fn step_heading(step: ResetStep) -> &'static str {
    match step {
        ResetStep::Email => "Reset your password",
        ResetStep::Code => "Enter verification code",
        ResetStep::Password => "Choose a new password",
        ResetStep::Success => "Password updated",
    }
}

pub(super) fn submit_label(step: ResetStep, loading: bool) -> &'static str {
    match (step, loading) {
        (ResetStep::Email, false) => "Send Code",
        (ResetStep::Email, true) => "Sending...",
        (ResetStep::Code, false) => "Verify Code",
        (ResetStep::Code, true) => "Verifying...",
        (ResetStep::Password, false) => "Reset Password",
        (ResetStep::Password, true) => "Resetting...",
        (ResetStep::Success, _) => "Done",
    }
}

#[component]
pub fn ForgotPasswordPanel() -> impl IntoView {
    let vm = use_forgot_password_view_model();
    view! { <ForgotPasswordForm vm=vm /> }
}

#[component]
pub(crate) fn ForgotPasswordForm(vm: ForgotPasswordViewModel) -> impl IntoView {
    let flow = vm.flow;
    let step = Signal::derive(move || vm.step());
    let loading = Signal::derive(move || vm.is_loading());
    let error = Signal::derive(move || vm.error());
    let code = Signal::derive(move || flow.with(|f| f.session().code.clone()));
    let code_length = flow.with_untracked(|f| f.policy().code_length);
    let min_length = flow.with_untracked(|f| f.policy().password_min_length);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    let email_fields = move || {
        view! {
            <div>
                <label for="reset-email" class="block text-sm font-medium text-fg">
                    "Email address"
                </label>
                <input
                    id="reset-email"
                    type="email"
                    autocomplete="email"
                    class="mt-1 appearance-none rounded-md block w-full px-3 py-2 border border-form-control-border bg-form-control-bg text-form-control-text focus:outline-none focus:ring-2 focus:ring-action-primary-focus sm:text-sm"
                    placeholder="you@example.com"
                    prop:value=move || flow.with(|f| f.session().email.clone())
                    disabled=move || loading.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        flow.update(|f| f.set_email(value));
                    }
                />
            </div>
        }
    };

    let code_fields = move || {
        view! {
            <div class="space-y-2">
                <p class="text-sm text-fg-muted text-center">
                    {move || {
                        format!(
                            "We sent a {}-digit code to {}",
                            code_length,
                            flow.with(|f| f.session().email.trim().to_string()),
                        )
                    }}
                </p>
                <CodeInput
                    length=code_length
                    code=code
                    disabled=loading
                    on_digit=Callback::new(move |(index, digit): (usize, String)| {
                        flow.update(|f| {
                            f.set_code_digit(index, &digit);
                        });
                    })
                    on_paste=Callback::new(move |text: String| {
                        flow.update(|f| {
                            f.paste_code(&text);
                        });
                    })
                />
            </div>
        }
    };

    let password_fields = move || {
        view! {
            <div class="space-y-4">
                <div>
                    <label for="new-password" class="block text-sm font-medium text-fg">
                        "New password"
                    </label>
                    <input
                        id="new-password"
                        type="password"
                        autocomplete="new-password"
                        class="mt-1 appearance-none rounded-md block w-full px-3 py-2 border border-form-control-border bg-form-control-bg text-form-control-text focus:outline-none focus:ring-2 focus:ring-action-primary-focus sm:text-sm"
                        prop:value=move || flow.with(|f| f.session().new_password.clone())
                        disabled=move || loading.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            flow.update(|f| f.set_new_password(value));
                        }
                    />
                    <p class="mt-1 text-xs text-fg-muted">
                        {format!("At least {} characters", min_length)}
                    </p>
                </div>
                <div>
                    <label for="confirm-password" class="block text-sm font-medium text-fg">
                        "Confirm password"
                    </label>
                    <input
                        id="confirm-password"
                        type="password"
                        autocomplete="new-password"
                        class="mt-1 appearance-none rounded-md block w-full px-3 py-2 border border-form-control-border bg-form-control-bg text-form-control-text focus:outline-none focus:ring-2 focus:ring-action-primary-focus sm:text-sm"
                        prop:value=move || flow.with(|f| f.session().confirm_password.clone())
                        disabled=move || loading.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            flow.update(|f| f.set_confirm_password(value));
                        }
                    />
                </div>
            </div>
        }
    };

    let success_view = move || {
        view! {
            <div class="space-y-4 text-center">
                <div class="rounded-md bg-status-success-bg p-4 text-status-success-text text-sm">
                    "Your password has been reset. You can now sign in with your new password."
                </div>
                <a
                    href="/login"
                    class="font-medium text-link hover:text-link-hover"
                    on:click=move |_| vm.close()
                >
                    "Back to login"
                </a>
            </div>
        }
    };

    view! {
        <div class="flex items-center justify-center py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                    {move || step_heading(step.get())}
                </h2>
                {move || match step.get() {
                    ResetStep::Success => success_view().into_view(),
                    current => {
                        view! {
                            <form class="mt-8 space-y-6" on:submit=on_submit>
                                {match current {
                                    ResetStep::Email => email_fields().into_view(),
                                    ResetStep::Code => code_fields().into_view(),
                                    _ => password_fields().into_view(),
                                }}
                                <InlineErrorMessage error=error />
                                <Button submit=true full_width=true loading=loading>
                                    {move || submit_label(step.get(), loading.get())}
                                </Button>
                                <div class="flex justify-between text-sm">
                                    <Show when=move || step.get().previous().is_some() fallback=|| ()>
                                        <Button
                                            variant=ButtonVariant::Ghost
                                            disabled=loading
                                            on:click=move |_| vm.back()
                                        >
                                            "Back"
                                        </Button>
                                    </Show>
                                    <a
                                        href="/login"
                                        class="ml-auto px-4 py-2 font-medium text-link hover:text-link-hover"
                                        on:click=move |_| vm.close()
                                    >
                                        "Cancel"
                                    </a>
                                </div>
                            </form>
                        }
                            .into_view()
                    }
                }}
            </div>
        </div>
    }
}
