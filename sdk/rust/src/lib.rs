//! Appello SDK
//!
//! A typed client for the Appello GraphQL API.
//!
//! # Session
//!
//! ```ignore
//! use appello_sdk::{AppelloClient, ClientConfig};
//!
//! let config = ClientConfig::new("https://api.appello.io", "key", "secret");
//! let client = AppelloClient::new(config)?;
//!
//! // Application token, then user token; later requests carry it.
//! client.authenticate_user("user", "password").await?;
//! client.renew_token().await?;
//! ```
//!
//! # Companies
//!
//! ```ignore
//! use appello_sdk::resources::companies::types::{CompanyPatch, ListOptions};
//!
//! let companies = client.companies();
//! let page = companies.get_list(ListOptions::default()).await?;
//! if page.has_errors() {
//!     // GraphQL errors are returned, not raised.
//! }
//!
//! companies
//!     .update_record("company-id", CompanyPatch::default().name("Renamed"))
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod token;
pub mod typed;

// Re-exports for convenience
pub use client::{AppelloClient, TOKEN_HEADER};
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::{ErrorCode, ResultExt, SdkError, SdkResult};
pub use resources::Companies;
pub use token::{RemoteError, TokenResponse};
pub use typed::{
    Document, GraphQLError, GraphQLLocation, NoVariables, OperationKind, Response, TypedOperation,
};
