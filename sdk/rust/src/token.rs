//! Response of the `/authenticate` and `/renew` endpoints.

use crate::error::{SdkError, SdkResult};
use serde::{Deserialize, Serialize};

/// Either a token or an error. A reply carrying an `error` is an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenResponse {
    Error { error: RemoteError },
    Token { token: String },
}

/// Error payload sent by the token endpoints. Any `error` object counts,
/// whichever members it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

impl TokenResponse {
    /// Extracts the token, turning the error variant into an auth error.
    /// An empty token is rejected as well.
    pub fn into_token(self) -> SdkResult<String> {
        match self {
            Self::Error { error } if error.name.is_empty() => Err(SdkError::auth(error.message)),
            Self::Error { error } => {
                Err(SdkError::auth(error.message).with_extension("name", error.name))
            }
            Self::Token { token } if token.is_empty() => {
                Err(SdkError::auth("No token found in response"))
            }
            Self::Token { token } => Ok(token),
        }
    }
}

/// Body posted to `/authenticate`.
#[derive(Serialize)]
pub(crate) struct ApplicationCredentials<'a> {
    pub key: &'a str,
    pub secret: &'a str,
}
