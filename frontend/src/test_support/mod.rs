#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::reset::{Clock, CodeMailer, IdentityService, ResetError};
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct IdentityState {
        calls: Vec<String>,
        request_code_error: Option<String>,
        verify_code_error: Option<String>,
        update_password_error: Option<String>,
    }

    /// Identity service double recording every call it receives.
    #[derive(Clone, Default)]
    pub struct StubIdentity {
        state: Rc<RefCell<IdentityState>>,
    }

    impl StubIdentity {
        pub fn calls(&self) -> Vec<String> {
            self.state.borrow().calls.clone()
        }

        pub fn fail_request_code(&self, msg: &str) {
            self.state.borrow_mut().request_code_error = Some(msg.to_string());
        }

        pub fn succeed_request_code(&self) {
            self.state.borrow_mut().request_code_error = None;
        }

        pub fn fail_verify_code(&self, msg: &str) {
            self.state.borrow_mut().verify_code_error = Some(msg.to_string());
        }

        pub fn fail_update_password(&self, msg: &str) {
            self.state.borrow_mut().update_password_error = Some(msg.to_string());
        }

        fn record(&self, call: String, error: Option<String>) -> Result<(), ResetError> {
            self.state.borrow_mut().calls.push(call);
            error.map_or(Ok(()), |msg| Err(ResetError::service(msg)))
        }
    }

    #[async_trait(?Send)]
    impl IdentityService for StubIdentity {
        async fn request_code(&self, email: &str) -> Result<(), ResetError> {
            let error = self.state.borrow().request_code_error.clone();
            self.record(format!("request_code:{}", email), error)
        }

        async fn verify_code(&self, email: &str, code: &str) -> Result<(), ResetError> {
            let error = self.state.borrow().verify_code_error.clone();
            self.record(format!("verify_code:{}:{}", email, code), error)
        }

        async fn update_password(&self, _new_password: &str) -> Result<(), ResetError> {
            let error = self.state.borrow().update_password_error.clone();
            self.record("update_password".to_string(), error)
        }
    }

    #[derive(Clone, Default)]
    pub struct RecordingMailer {
        sent: Rc<RefCell<Vec<(String, String)>>>,
    }

    impl RecordingMailer {
        pub fn sent(&self) -> Vec<(String, String)> {
            self.sent.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl CodeMailer for RecordingMailer {
        async fn send_code(&self, email: &str, code: &str) -> Result<(), ResetError> {
            self.sent
                .borrow_mut()
                .push((email.to_string(), code.to_string()));
            Ok(())
        }
    }

    /// Clock frozen at a given instant; clones share the same time.
    #[derive(Clone)]
    pub struct FixedClock {
        now: Rc<Cell<DateTime<Utc>>>,
    }

    impl FixedClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self {
                now: Rc::new(Cell::new(now)),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }
    }
}
