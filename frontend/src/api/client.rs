use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

use crate::{api::types::ApiError, config};

/// REST client for the hosted auth, table and function endpoints.
///
/// Clones share the in-memory access token obtained from a code
/// verification, so the page repositories can each hold their own handle.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    anon_key: Option<String>,
    access_token: Rc<RefCell<Option<String>>>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            anon_key: None,
            access_token: Rc::new(RefCell::new(None)),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    pub fn with_anon_key(mut self, anon_key: impl Into<String>) -> Self {
        self.anon_key = Some(anon_key.into());
        self
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_config().await.api_base_url
        }
    }

    async fn resolved_anon_key(&self) -> Option<String> {
        if self.base_url.is_some() {
            self.anon_key.clone()
        } else {
            self.anon_key
                .clone()
                .or(config::await_config().await.anon_key)
        }
    }

    pub(crate) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let base_url = self.resolved_base_url().await;
        let mut builder = self
            .client
            .request(method, format!("{}{}", base_url.trim_end_matches('/'), path));
        if let Some(key) = self.resolved_anon_key().await {
            builder = builder.header("apikey", key);
        }
        builder
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token.borrow().clone()
    }

    pub fn set_access_token(&self, token: Option<String>) {
        *self.access_token.borrow_mut() = token;
    }

    pub(crate) fn bearer_token(&self) -> Result<String, ApiError> {
        self.access_token()
            .ok_or_else(|| ApiError::unauthorized("Auth session missing"))
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            self.set_access_token(None);
        }
    }

    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::request_failed(format!("Invalid request: {}", e)))?;

        let response = match mocked_response(&request) {
            Some(mocked) => mocked?,
            None => self
                .client
                .execute(request)
                .await
                .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?,
        };
        self.handle_unauthorized_status(response.status());
        Ok(response)
    }

    pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
    }

    pub(crate) async fn expect_success(response: Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        ApiError::from_response(status, &body)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
fn mocked_response(request: &reqwest::Request) -> Option<Result<Response, ApiError>> {
    let responder = mock::find_mock(request.url().as_str())?;
    Some(responder.respond(request).and_then(MockResponse::into_response))
}

#[cfg(not(all(test, not(target_arch = "wasm32"))))]
fn mocked_response(_request: &reqwest::Request) -> Option<Result<Response, ApiError>> {
    None
}


#[cfg(all(test, not(target_arch = "wasm32")))]
pub use mock::{register_mock, MockResponse, TestResponder};
