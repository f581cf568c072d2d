use crate::api::{ApiClient, ApiError};
use std::rc::Rc;

/// Reads `access_token` from a recovery link fragment
/// (`#access_token=...&type=recovery`).
pub(super) fn access_token_from_fragment(fragment: &str) -> Option<String> {
    let fragment = fragment.trim_start_matches('#');
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

#[derive(Clone)]
pub struct ResetPasswordRepository {
    client: Rc<ApiClient>,
}

impl ResetPasswordRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Adopts the token from the recovery link, if any, and reports whether
    /// the identity service accepts the resulting session.
    pub async fn has_recovery_session(&self, link_token: Option<String>) -> Result<bool, ApiError> {
        if let Some(token) = link_token {
            self.client.set_access_token(Some(token));
        }
        Ok(self.client.current_user().await?.is_some())
    }

    pub async fn update_password(&self, new_password: String) -> Result<(), ApiError> {
        self.client.update_password(&new_password).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_token_is_extracted() {
        assert_eq!(
            access_token_from_fragment("#access_token=abc.def&type=recovery").as_deref(),
            Some("abc.def")
        );
        assert_eq!(
            access_token_from_fragment("type=recovery&access_token=a%2Bb").as_deref(),
            Some("a+b")
        );
    }

    #[test]
    fn missing_or_empty_fragment_token_is_none() {
        assert!(access_token_from_fragment("").is_none());
        assert!(access_token_from_fragment("#type=recovery").is_none());
        assert!(access_token_from_fragment("#access_token=").is_none());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    fn repository(server: &MockServer) -> ResetPasswordRepository {
        ResetPasswordRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/project"),
        )))
    }

    #[tokio::test]
    async fn link_token_establishes_session_and_updates_password() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/project/auth/v1/user");
            then.status(200).json_body(json!({ "id": "u1", "email": "a@b.com" }));
        });
        server.mock(|when, then| {
            when.method(PUT).path("/project/auth/v1/user");
            then.status(200).json_body(json!({ "id": "u1" }));
        });

        let repo = repository(&server);
        assert!(repo
            .has_recovery_session(Some("link-token".into()))
            .await
            .unwrap());
        repo.update_password("new-password".into()).await.unwrap();

        let received = server.received();
        assert_eq!(received[0].header("authorization"), Some("Bearer link-token"));
        assert_eq!(received[1].body, Some(json!({ "password": "new-password" })));
    }

    #[tokio::test]
    async fn no_token_means_no_session() {
        let server = MockServer::start_async().await;
        let repo = repository(&server);
        assert!(!repo.has_recovery_session(None).await.unwrap());
        assert!(server.received().is_empty());
    }

    #[tokio::test]
    async fn rejected_token_means_no_session() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/project/auth/v1/user");
            then.status(401).json_body(json!({ "msg": "invalid JWT" }));
        });

        let repo = repository(&server);
        assert!(!repo
            .has_recovery_session(Some("expired".into()))
            .await
            .unwrap());
    }
}
