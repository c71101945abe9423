//! Appello GraphQL client.
//!
//! Owns the application credentials and the current session token, and
//! performs the three network operations the API exposes:
//!
//! - `POST /authenticate` - application key/secret for an application token
//! - `POST /renew` - current token for a fresh one
//! - `POST /graphql` - queries and mutations, authorized by the `token` header
//!
//! # Example
//!
//! ```ignore
//! use appello_sdk::{AppelloClient, ClientConfig, NoVariables};
//!
//! let config = ClientConfig::new("https://api.appello.io", "key", "secret");
//! let client = AppelloClient::connect(config, "user", "password").await?;
//!
//! let me = client
//!     .query::<serde_json::Value>("{ me { id fullName } }", NoVariables::default())
//!     .await?;
//! ```

use crate::config::ClientConfig;
use crate::error::{ErrorCode, ResultExt, SdkError, SdkResult};
use crate::token::{ApplicationCredentials, TokenResponse};
use crate::typed::{Document, OperationKind, RequestBody, Response, TypedOperation};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// Header carrying the application or user token.
pub const TOKEN_HEADER: &str = "token";

/// Absolute endpoint URLs derived from the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Endpoints {
    authenticate: Url,
    renew: Url,
    graphql: Url,
}

impl Endpoints {
    /// Resolves the endpoints with URL-join semantics: a leading `/`
    /// replaces any path on the base URL.
    fn resolve(base_url: &str) -> SdkResult<Self> {
        let base = Url::parse(base_url.trim()).map_err(|e| {
            SdkError::invalid_url(format!("Invalid base URL {base_url:?}: {e}"))
        })?;

        Ok(Self {
            authenticate: base.join("/authenticate")?,
            renew: base.join("/renew")?,
            graphql: base.join("/graphql")?,
        })
    }
}

/// Exchanges an application token plus user credentials for a user token.
struct AuthenticateUser;

#[derive(Serialize)]
struct AuthenticateUserVariables {
    username: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticateUserData {
    authenticate_user: Option<String>,
}

impl TypedOperation for AuthenticateUser {
    type Variables = AuthenticateUserVariables;
    type Response = AuthenticateUserData;

    const OPERATION: &'static str = r"query AuthenticateUser($username: String!, $password: String!) {
    authenticateUser(username: $username, password: $password)
}";
    const OPERATION_NAME: &'static str = "AuthenticateUser";
    const KIND: OperationKind = OperationKind::Query;
}

/// The Appello GraphQL client.
///
/// The session token starts empty and is set by
/// [`authenticate_user`](Self::authenticate_user). Every later request
/// carries it until [`renew_token`](Self::renew_token) replaces it.
pub struct AppelloClient {
    http: Client,
    config: ClientConfig,
    endpoints: Endpoints,
    token: RwLock<String>,
}

impl fmt::Debug for AppelloClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppelloClient")
            .field("config", &self.config)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl AppelloClient {
    /// Creates an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` when the base URL cannot be parsed and
    /// `InvalidRequest` when a default header is malformed.
    pub fn new(config: ClientConfig) -> SdkResult<Self> {
        let endpoints = Endpoints::resolve(&config.base_url)?;

        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_sdk_err_with(ErrorCode::InvalidRequest, format!("Invalid header name: {key}"))?;
            let value = HeaderValue::from_str(value).map_sdk_err_with(
                ErrorCode::InvalidRequest,
                format!("Invalid value for header {key}"),
            )?;
            headers.insert(name, value);
        }

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_sdk_err_with(ErrorCode::InvalidRequest, "Failed to build HTTP client")?;

        Ok(Self {
            http,
            config,
            endpoints,
            token: RwLock::new(String::new()),
        })
    }

    /// Creates a client and authenticates it in one step.
    ///
    /// # Errors
    ///
    /// Any error from [`new`](Self::new) or
    /// [`authenticate_user`](Self::authenticate_user).
    pub async fn connect(config: ClientConfig, username: &str, password: &str) -> SdkResult<Self> {
        let client = Self::new(config)?;
        client.authenticate_user(username, password).await?;
        Ok(client)
    }

    /// Returns the GraphQL endpoint URL.
    pub fn graphql_url(&self) -> &Url {
        &self.endpoints.graphql
    }

    /// Returns the current session token, empty before authentication.
    pub async fn token(&self) -> String {
        self.token.read().await.clone()
    }

    /// Returns true once a user token has been stored.
    pub async fn is_authenticated(&self) -> bool {
        !self.token.read().await.is_empty()
    }

    /// Obtains an application token with the configured key and secret.
    ///
    /// The token is returned, not stored.
    ///
    /// # Errors
    ///
    /// `AuthError` on a non-2xx status or an error payload; transport
    /// errors as `NetworkError`/`Timeout`.
    pub async fn acquire_application_token(&self) -> SdkResult<String> {
        debug!(url = %self.endpoints.authenticate, "requesting application token");

        let response = self
            .http
            .post(self.endpoints.authenticate.clone())
            .json(&ApplicationCredentials {
                key: &self.config.api_key,
                secret: &self.config.api_secret,
            })
            .send()
            .await?;

        read_token_response(response, "Failed to get application token").await
    }

    /// Logs a user in and stores the resulting user token.
    ///
    /// Runs the `authenticateUser` query with the application token in
    /// place of the (still absent) session token.
    ///
    /// # Errors
    ///
    /// `AuthError` if the application token cannot be obtained, or if the
    /// query reports errors or returns no token. The stored token is left
    /// untouched on failure.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> SdkResult<&Self> {
        let application_token = self.acquire_application_token().await?;

        let variables = AuthenticateUserVariables {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: Response<AuthenticateUserData> = self
            .graphql_request(
                &Document::of::<AuthenticateUser>(),
                &variables,
                Some(&application_token),
            )
            .await?;

        if let Some(message) = response.first_error_message() {
            warn!(username, "user authentication rejected");
            return Err(SdkError::auth(message));
        }

        let token = response
            .data
            .and_then(|data| data.authenticate_user)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| SdkError::auth("No user token in authenticateUser response"))?;

        *self.token.write().await = token;
        info!(username, "user authenticated");

        Ok(self)
    }

    /// Exchanges the current session token for a fresh one.
    ///
    /// # Errors
    ///
    /// Same conditions as [`acquire_application_token`](Self::acquire_application_token).
    pub async fn renew_token(&self) -> SdkResult<&Self> {
        let current = self.token().await;
        debug!(url = %self.endpoints.renew, "renewing session token");

        let response = self
            .http
            .post(self.endpoints.renew.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(TOKEN_HEADER, current)
            .send()
            .await?;

        let token = read_token_response(response, "Failed to renew application token").await?;
        *self.token.write().await = token;
        info!("session token renewed");

        Ok(self)
    }

    /// Sends a GraphQL document with the given variables.
    ///
    /// GraphQL errors are returned in the envelope, not raised.
    ///
    /// # Errors
    ///
    /// `ServerError` for any 5xx status, `DeserializeError` when the body is
    /// not a GraphQL envelope, and transport errors.
    pub async fn query<T: DeserializeOwned>(
        &self,
        document: impl Into<Document>,
        variables: impl Serialize,
    ) -> SdkResult<Response<T>> {
        self.graphql_request(&document.into(), &variables, None)
            .await
    }

    /// Sends a typed operation.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub async fn execute<Op: TypedOperation>(
        &self,
        variables: Op::Variables,
    ) -> SdkResult<Response<Op::Response>> {
        self.graphql_request(&Document::of::<Op>(), &variables, None)
            .await
    }

    async fn graphql_request<T: DeserializeOwned, V: Serialize>(
        &self,
        document: &Document,
        variables: &V,
        token_override: Option<&str>,
    ) -> SdkResult<Response<T>> {
        let token = match token_override {
            Some(token) => token.to_string(),
            None => self.token().await,
        };
        let body = serde_json::to_vec(&RequestBody {
            query: document.query(),
            variables,
            operation_name: document.name(),
        })
        .map_sdk_err_with(ErrorCode::SerializeError, "Failed to serialize GraphQL variables")?;

        debug!(
            operation = document.name().unwrap_or("anonymous"),
            "sending GraphQL request"
        );

        let response = self
            .http
            .post(self.endpoints.graphql.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(TOKEN_HEADER, token)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(SdkError::server(format!("Server Error: {status}"))
                .with_extension("status", status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let envelope: Response<T> = serde_json::from_slice(&bytes).map_sdk_err_with(
            ErrorCode::DeserializeError,
            format!("Failed to parse GraphQL response (HTTP {status})"),
        )?;

        if envelope.has_errors() {
            debug!(
                errors = envelope.errors().len(),
                "GraphQL response carried errors"
            );
        }

        Ok(envelope)
    }
}

/// Turns a `/authenticate` or `/renew` reply into a token.
async fn read_token_response(response: reqwest::Response, context: &str) -> SdkResult<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(SdkError::auth(format!("{context}: {status}"))
            .with_extension("status", status.as_u16()));
    }

    let bytes = response.bytes().await?;
    let reply: TokenResponse = serde_json::from_slice(&bytes)
        .map_sdk_err_with(ErrorCode::AuthError, format!("{context}: unexpected response"))?;

    reply.into_token()
}
