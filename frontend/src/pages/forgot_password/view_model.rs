use super::repository::ForgotPasswordRepository;
use crate::api::ApiClient;
use crate::config;
use crate::reset::{
    dispatch, PasswordResetFlow, PendingRequest, ResetError, ResetPolicy, ResetService, ResetStep,
};
use leptos::*;
use std::rc::Rc;

type SubmitOutcome = (PendingRequest, Result<(), ResetError>);

#[derive(Clone, Copy)]
pub struct ForgotPasswordViewModel {
    pub flow: RwSignal<PasswordResetFlow>,
    pub submit_action: Action<PendingRequest, SubmitOutcome>,
}

impl ForgotPasswordViewModel {
    pub fn step(&self) -> ResetStep {
        self.flow.with(|flow| flow.step())
    }

    pub fn is_loading(&self) -> bool {
        self.flow.with(|flow| flow.session().is_loading)
    }

    pub fn error(&self) -> Option<String> {
        self.flow.with(|flow| flow.session().error.clone())
    }

    /// Validates the current step and, when it passes, hands the call to
    /// the submit action.
    pub fn submit(&self) {
        let request = self
            .flow
            .try_update(|flow| flow.begin_submit())
            .flatten();
        if let Some(request) = request {
            self.submit_action.dispatch(request);
        }
    }

    pub fn back(&self) {
        self.flow.update(|flow| {
            if let Err(err) = flow.back() {
                log::debug!("{}", err);
            }
        });
    }

    pub fn close(&self) {
        self.flow.update(PasswordResetFlow::close);
    }
}

pub fn use_forgot_password_view_model() -> ForgotPasswordViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = ForgotPasswordRepository::new_with_client(Rc::new(api));

    let cfg = config::current_config();
    let policy = ResetPolicy::default().with_password_min_length(cfg.password_min_length);
    let service = repository.reset_service(cfg.reset_mode, policy);

    build_view_model(service, policy)
}

pub(crate) fn build_view_model(
    service: Rc<dyn ResetService>,
    policy: ResetPolicy,
) -> ForgotPasswordViewModel {
    let flow = create_rw_signal(PasswordResetFlow::new(policy));

    let submit_action = create_action(move |request: &PendingRequest| {
        let service = service.clone();
        let request = request.clone();
        async move {
            let outcome = dispatch(service.as_ref(), request.call()).await;
            (request, outcome)
        }
    });

    create_effect(move |_| {
        if let Some((request, outcome)) = submit_action.value().get() {
            flow.update(|flow| flow.complete(request, outcome));
        }
    });

    ForgotPasswordViewModel {
        flow,
        submit_action,
    }
}
