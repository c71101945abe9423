//! Strongly typed operations and the GraphQL response envelope.

use crate::error::{ErrorCode, SdkError, SdkResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::borrow::Cow;

// ============================================================================
// Typed GraphQL Operations
// ============================================================================

/// A strongly typed GraphQL operation.
///
/// # Example
///
/// ```ignore
/// use appello_sdk::typed::{OperationKind, TypedOperation};
///
/// #[derive(Serialize)]
/// struct GetCompanyVariables { id: String }
///
/// #[derive(Deserialize)]
/// struct GetCompanyData { company: Option<Company> }
///
/// struct GetCompany;
///
/// impl TypedOperation for GetCompany {
///     type Variables = GetCompanyVariables;
///     type Response = GetCompanyData;
///
///     const OPERATION: &'static str = "query GetCompany($id: ID!) { company(id: $id) { id name } }";
///     const OPERATION_NAME: &'static str = "GetCompany";
///     const KIND: OperationKind = OperationKind::Query;
/// }
/// ```
pub trait TypedOperation {
    /// The input variables type.
    type Variables: Serialize;

    /// The response data type.
    type Response: DeserializeOwned;

    /// The GraphQL operation string.
    const OPERATION: &'static str;

    /// The operation name.
    const OPERATION_NAME: &'static str;

    /// The kind of operation.
    const KIND: OperationKind;
}

/// The kind of GraphQL operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// Marker type for operations without variables. Serializes to `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoVariables {}

/// A GraphQL document ready to be sent.
///
/// Built from a raw query string or from a [`TypedOperation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    query: Cow<'static, str>,
    operation_name: Option<Cow<'static, str>>,
}

impl Document {
    /// Creates a document from query text.
    pub fn new(query: impl Into<Cow<'static, str>>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
        }
    }

    /// Creates the document of a typed operation.
    pub fn of<Op: TypedOperation>() -> Self {
        Self {
            query: Cow::Borrowed(Op::OPERATION),
            operation_name: Some(Cow::Borrowed(Op::OPERATION_NAME)),
        }
    }

    /// Sets the operation name.
    #[must_use]
    pub fn operation_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Returns the query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the operation name, if any.
    pub fn name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }
}

impl From<&'static str> for Document {
    fn from(query: &'static str) -> Self {
        Self::new(query)
    }
}

impl From<String> for Document {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}

/// The JSON body posted to the GraphQL endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestBody<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: &'a V,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<&'a str>,
}

// ============================================================================
// Response Types
// ============================================================================

/// The `{ data, errors? }` envelope returned by every GraphQL call.
///
/// `errors` is kept exactly as the server sent it. A non-empty list means
/// the operation did not take effect as requested, so check
/// [`has_errors`](Self::has_errors) before trusting `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLError>>,
}

impl<T> Response<T> {
    /// Returns true if the response has errors.
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    /// Returns the errors, empty when the server sent none.
    pub fn errors(&self) -> &[GraphQLError] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Returns the message of the first error.
    pub fn first_error_message(&self) -> Option<&str> {
        self.errors().first().map(|e| e.message.as_str())
    }

    /// Returns the data if present and no errors occurred.
    pub fn into_result(self) -> SdkResult<T> {
        if let Some(message) = self.first_error_message() {
            return Err(SdkError::new(ErrorCode::ExecutionError, message));
        }

        self.data
            .ok_or_else(|| SdkError::new(ErrorCode::NoData, "No data in response"))
    }

    /// Maps the data, keeping the errors.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            data: self.data.map(f),
            errors: self.errors,
        }
    }
}

/// A GraphQL error as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<GraphQLLocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Map<String, serde_json::Value>>,
    /// Any other members the server included.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl GraphQLError {
    /// Creates an error with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: None,
            path: None,
            extensions: None,
            other: serde_json::Map::new(),
        }
    }
}

/// Source location of a GraphQL error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQLLocation {
    pub line: u32,
    pub column: u32,
}
