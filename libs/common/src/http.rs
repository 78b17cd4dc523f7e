//! HTTP client wrapper
//!
//! One [`HttpClient`] is built per process. It attaches the bearer token
//! supplied by the injected [`TokenProvider`], unwraps every success body
//! through [`crate::envelope::unwrap`], and applies the unauthorized policy:
//! a 401 outside the login view clears the tokens and hard-navigates to
//! `/login`, while a 401 on `/login` or `/` is returned untouched so the
//! login form can show the server message.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{
    config::ClientConfig,
    envelope,
    error::{ClientError, ClientResult, extract_error_message},
    navigation::{Navigator, Route, is_login_path},
};

/// Source of the bearer token attached to outgoing requests
pub trait TokenProvider: Send + Sync {
    /// Current access token, if a session is stored
    fn access_token(&self) -> Option<String>;

    /// Forget every stored token
    fn clear_tokens(&self);
}

/// HTTP client with token injection and envelope normalization
#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    navigator: Arc<dyn Navigator>,
}

impl HttpClient {
    /// Create a new client against the configured API URL
    pub fn new(
        config: &ClientConfig,
        tokens: Arc<dyn TokenProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        Self::with_base_url(&config.api_url, config, tokens, navigator)
    }

    /// Create a new client against an explicit base URL
    pub fn with_base_url(
        base_url: &str,
        config: &ClientConfig,
        tokens: Arc<dyn TokenProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Network)?;

        info!("HTTP client initialized with base URL: {}", base_url);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            tokens,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET`
    pub async fn get<T>(&self, path: &str, expected: &[&str]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path);
        self.send(request, expected).await
    }

    /// `GET` with query parameters
    pub async fn get_with_query<Q, T>(
        &self,
        path: &str,
        query: &Q,
        expected: &[&str],
    ) -> ClientResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path).query(query);
        self.send(request, expected).await
    }

    /// `POST` with a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B, expected: &[&str]) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        self.send(request, expected).await
    }

    /// `PATCH` with a JSON body
    pub async fn patch<B, T>(&self, path: &str, body: &B, expected: &[&str]) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PATCH, path).json(body);
        self.send(request, expected).await
    }

    /// `DELETE`
    pub async fn delete<T>(&self, path: &str, expected: &[&str]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::DELETE, path);
        self.send(request, expected).await
    }

    /// `POST` with a multipart body
    pub async fn post_multipart<T>(&self, path: &str, form: Form, expected: &[&str]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).multipart(form);
        self.send(request, expected).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let request = self.http.request(method, url);
        match self.tokens.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        expected: &[&str],
    ) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| {
            error!("Request failed: {}", e);
            ClientError::Network(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::Network)?;
        let body = parse_body(&bytes);

        if status == StatusCode::UNAUTHORIZED {
            return Err(self.handle_unauthorized(&body));
        }

        if !status.is_success() {
            let server_message = extract_error_message(&body);
            warn!(
                "Request returned {}: {}",
                status,
                server_message.as_deref().unwrap_or("<no message>")
            );
            return Err(ClientError::Http {
                status: status.as_u16(),
                server_message,
            });
        }

        // 204 and friends: decode from an empty object
        if body.is_null() {
            return serde_json::from_value(Value::Object(Default::default()))
                .map_err(ClientError::Decode);
        }

        envelope::decode(body, expected)
    }

    fn handle_unauthorized(&self, body: &Value) -> ClientError {
        let current = self.navigator.current_path();

        if is_login_path(&current) {
            debug!("401 on {}, leaving it to the caller", current);
            return ClientError::Http {
                status: StatusCode::UNAUTHORIZED.as_u16(),
                server_message: extract_error_message(body),
            };
        }

        warn!("401 on {}, clearing session and redirecting to login", current);
        self.tokens.clear_tokens();
        self.navigator.hard_navigate(&Route::Login.path());
        ClientError::SessionExpired
    }
}

/// JSON body, or the raw text wrapped as a JSON string
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
