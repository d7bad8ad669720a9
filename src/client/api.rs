//! Authenticated API client
//!
//! The client resolves hosts through a `HostRegistry`, caches bearer tokens
//! through a `TokenStore`, and handles the authenticate-then-retry flow:
//! a 401 response refreshes the token and replays the identical request,
//! bounded by a retry budget.

use crate::error::{Error, Result};
use crate::registry::HostRegistry;
use crate::tokens::TokenStore;
use crate::types::{JsonValue, Method};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Path of the token-issuing endpoint, relative to the host base URL
const AUTH_PATH: &str = "/security/user/authenticate";

/// Default retry budget: re-authentication+retry cycles per logical request
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Retry budget per request (re-authentication+retry cycles)
    pub max_attempts: u32,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            user_agent: format!("hostlink/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry budget
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Specification of a single logical request
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method
    pub method: Method,
    /// Path relative to the host base URL
    pub path: String,
    /// Target host identifier
    pub host_id: String,
    /// JSON payload, if any
    pub body: Option<JsonValue>,
    /// Override the client's retry budget for this request
    pub max_attempts: Option<u32>,
}

impl RequestSpec {
    /// Create a request spec for a method, path and host
    pub fn new(method: Method, path: impl Into<String>, host_id: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            host_id: host_id.into(),
            body: None,
            max_attempts: None,
        }
    }

    /// Set the JSON payload
    #[must_use]
    pub fn body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Override the retry budget
    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }
}

/// Authenticated API client
///
/// Holds its collaborators behind trait objects so callers can swap the
/// registry and token store without a generic parameter spreading through
/// their own types.
pub struct ApiClient {
    http: Client,
    registry: Arc<dyn HostRegistry>,
    tokens: Arc<dyn TokenStore>,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client with default configuration
    pub fn new(registry: Arc<dyn HostRegistry>, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_config(registry, tokens, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(
        registry: Arc<dyn HostRegistry>,
        tokens: Arc<dyn TokenStore>,
        config: ClientConfig,
    ) -> Self {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            registry,
            tokens,
            config,
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Obtain a fresh bearer token for a host and persist it
    ///
    /// Issues `GET {url}:{port}/security/user/authenticate` with the host's
    /// basic credentials. On 200 the token is extracted from the JSON body,
    /// stored (overwriting any previous token for the host) and returned.
    ///
    /// # Errors
    ///
    /// `Error::HostNotFound` for an unknown host, `Error::Auth` when the
    /// endpoint refuses the credentials, `Error::Http` on transport failure,
    /// `Error::MalformedResponse` when no token can be extracted.
    pub async fn authenticate(&self, host_id: &str) -> Result<String> {
        let host = self.registry.host_by_id(host_id).await?;
        let url = host.endpoint(AUTH_PATH);

        debug!("Requesting bearer token: GET {}", url);
        let response = self
            .http
            .get(&url)
            .basic_auth(&host.username, Some(&host.password))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!("Authentication against '{}' failed with {}", host_id, status.as_u16());
            return Err(Error::auth(host_id, status.as_u16(), body));
        }

        let body: JsonValue = response.json().await.map_err(|e| {
            Error::malformed(format!("authenticate response is not valid JSON: {e}"))
        })?;
        let token = extract_token(&body)
            .ok_or_else(|| Error::malformed("authenticate response carries no token field"))?;

        self.tokens.update_token(host_id, token.clone()).await;
        debug!("Stored fresh token for '{}'", host_id);
        Ok(token)
    }

    /// Execute a request spec and return the response body as-is
    ///
    /// The flow per attempt:
    ///
    /// 1. Use the cached token for the host; when none is cached,
    ///    authenticate first (a failure there is swallowed and the attempt
    ///    goes out unauthenticated).
    /// 2. Issue the request with `Authorization: Bearer <token>`.
    /// 3. On 2xx, return the parsed JSON body without shape validation.
    /// 4. On 401 with budget remaining, re-authenticate (ignoring the
    ///    outcome) and replay the identical method/path/body.
    /// 5. On any other status, or 401 with the budget spent, or a transport
    ///    error, return the corresponding error. Transport errors are not
    ///    retried.
    pub async fn execute(&self, spec: RequestSpec) -> Result<JsonValue> {
        let host = self.registry.host_by_id(&spec.host_id).await?;
        let url = host.endpoint(&spec.path);
        let budget = spec.max_attempts.unwrap_or(self.config.max_attempts);
        let mut retries_left = budget;

        let mut token = match self.tokens.token_by_id(&spec.host_id).await {
            Some(token) => Some(token),
            None => match self.authenticate(&spec.host_id).await {
                Ok(token) => Some(token),
                Err(e) => {
                    debug!("Initial authentication against '{}' failed: {}", spec.host_id, e);
                    None
                }
            },
        };

        loop {
            let mut req = self.http.request(spec.method.into(), &url);
            if let Some(ref token) = token {
                req = req.bearer_auth(token);
            }
            if let Some(ref body) = spec.body {
                req = req.json(body);
            }

            let response = req.send().await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                if retries_left == 0 {
                    warn!(
                        "{} {} still unauthorized after {} re-authentication attempts",
                        spec.method, url, budget
                    );
                    return Err(Error::RetriesExhausted { attempts: budget });
                }
                retries_left -= 1;
                warn!(
                    "Unauthorized: {} {}, refreshing token ({} retries left)",
                    spec.method, url, retries_left
                );
                match self.authenticate(&spec.host_id).await {
                    Ok(fresh) => token = Some(fresh),
                    // Replay with the previous token anyway; another 401
                    // spends the budget.
                    Err(e) => {
                        debug!("Re-authentication against '{}' failed: {}", spec.host_id, e);
                    }
                }
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::upstream_status(status.as_u16(), body));
            }

            debug!("Request succeeded: {} {}", spec.method, url);
            return response
                .json()
                .await
                .map_err(|e| Error::malformed(format!("response body is not valid JSON: {e}")));
        }
    }

    /// Execute a request spec and deserialize the body
    pub async fn execute_as<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T> {
        let body = self.execute(spec).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Issue a request against a host
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonValue>,
        host_id: &str,
    ) -> Result<JsonValue> {
        let mut spec = RequestSpec::new(method, path, host_id);
        spec.body = body;
        self.execute(spec).await
    }

    /// Issue a GET request against a host
    pub async fn get(&self, host_id: &str, path: &str) -> Result<JsonValue> {
        self.execute(RequestSpec::new(Method::GET, path, host_id))
            .await
    }

    /// Issue a POST request against a host
    pub async fn post(&self, host_id: &str, path: &str, body: JsonValue) -> Result<JsonValue> {
        self.execute(RequestSpec::new(Method::POST, path, host_id).body(body))
            .await
    }

    /// Issue a PUT request against a host
    pub async fn put(&self, host_id: &str, path: &str, body: JsonValue) -> Result<JsonValue> {
        self.execute(RequestSpec::new(Method::PUT, path, host_id).body(body))
            .await
    }

    /// Issue a DELETE request against a host
    pub async fn delete(&self, host_id: &str, path: &str) -> Result<JsonValue> {
        self.execute(RequestSpec::new(Method::DELETE, path, host_id))
            .await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Extract the bearer token from an authenticate response body
///
/// Accepts both `{"data": {"token": "..."}}` and the flat `{"token": "..."}`
/// shape.
fn extract_token(body: &JsonValue) -> Option<String> {
    body.pointer("/data/token")
        .or_else(|| body.get("token"))
        .and_then(JsonValue::as_str)
        .map(ToString::to_string)
}
