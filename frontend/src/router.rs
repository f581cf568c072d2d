use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::pages::{
    forgot_password::ForgotPasswordPage, home::HomePage, reset_password::ResetPasswordPage,
};

pub const ROUTE_PATHS: &[&str] = &["/", "/login", "/forgot-password", "/reset-password"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(crate::api::ApiClient::new());
    view! {
        <Title text="ReStock"/>
        <Router>
            <Routes>
                <Route path="/" view=HomePage/>
                <Route path="/login" view=HomePage/>
                <Route path="/forgot-password" view=ForgotPasswordPage/>
                <Route path="/reset-password" view=ResetPasswordPage/>
            </Routes>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn route_paths_include_reset_routes() {
        assert!(ROUTE_PATHS.contains(&"/forgot-password"));
        assert!(ROUTE_PATHS.contains(&"/reset-password"));
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
