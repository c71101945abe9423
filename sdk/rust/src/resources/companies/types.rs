//! Company records, operation inputs and response shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Page size used when none is given.
pub const DEFAULT_TAKE: u32 = 10;
/// Offset used when none is given.
pub const DEFAULT_SKIP: u32 = 0;
/// Column the table record set is sorted on by default.
pub const DEFAULT_ORDER_COLUMN: &str = "name";
/// Table-data model name of companies.
pub const MODEL_NAME: &str = "Company";

// ============================================================================
// Records
// ============================================================================

/// Entry of the company list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: String,
    pub name: String,
}

/// A company as returned by the record queries and mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company_type: Option<String>,
    #[serde(default)]
    pub company_type_id: Option<String>,
    #[serde(default)]
    pub is_archived: bool,
}

/// Result of archiving or restoring a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedCompany {
    pub id: String,
    pub name: String,
    pub is_archived: bool,
}

/// Column description of the company table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub list_values: Vec<ListValue>,
    #[serde(default)]
    pub is_foreign_key: bool,
    #[serde(default)]
    pub reference_model: Option<String>,
    #[serde(default)]
    pub reference_column: Option<String>,
}

/// Allowed value of a list column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListValue {
    pub value: String,
    pub label: String,
}

/// Row of the company table record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyTableRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub account_payable_contact: Option<String>,
    #[serde(default)]
    pub account_receivable_contact: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default, rename = "phoneHQ")]
    pub phone_hq: Option<String>,
    #[serde(default, rename = "phoneHQExtension")]
    pub phone_hq_extension: Option<String>,
    #[serde(default, rename = "faxHQ")]
    pub fax_hq: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub linked_in_url: Option<String>,
    #[serde(default)]
    pub primary_contact: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub company_type: Option<Tag>,
    #[serde(default)]
    pub industry: Option<Tag>,
}

/// Postal address attached to a table record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
}

/// Labelled lookup value (company type, industry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub workflow_state: Option<String>,
}

// ============================================================================
// Response data
// ============================================================================

// Root fields are nullable: a failed operation answers `null` next to its
// errors.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPage {
    pub data: Vec<CompanySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCompaniesData {
    pub companies: Option<CompanyPage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCompanyData {
    pub company: Option<Company>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyData {
    pub create_company: Option<Company>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyData {
    pub edit_company: Option<Company>,
}

/// `deleteCompany` is a scalar whose exact type the API does not pin down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCompanyData {
    #[serde(default)]
    pub delete_company: Value,
}

impl DeleteCompanyData {
    /// Interprets the payload as a success flag.
    pub fn succeeded(&self) -> bool {
        match &self.delete_company {
            Value::Null => false,
            Value::Bool(deleted) => *deleted,
            Value::String(s) => !s.is_empty() && s != "false",
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveCompanyData {
    pub archive_company: Option<ArchivedCompany>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreCompanyData {
    pub restore_company: Option<ArchivedCompany>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumns {
    pub columns: Vec<TableColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnsData {
    pub table_data: Option<TableColumns>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecordSet {
    pub record_count: u64,
    pub record_set: Vec<CompanyTableRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecordSetData {
    pub table_data: Option<TableRecordSet>,
}

// ============================================================================
// Inputs
// ============================================================================

/// Fields of a new company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    pub description: String,
    pub company_type_id: String,
}

/// Partial update: only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_type_id: Option<String>,
}

impl CompanyPatch {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn company_type_id(mut self, company_type_id: impl Into<String>) -> Self {
        self.company_type_id = Some(company_type_id.into());
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.company_type_id.is_none()
    }
}

/// Paging of the company list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub take: Option<u32>,
    pub skip: Option<u32>,
}

impl ListOptions {
    #[must_use]
    pub fn take(mut self, take: u32) -> Self {
        self.take = Some(take);
        self
    }

    #[must_use]
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }
}

/// Sort direction of the table record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort column and direction, sent as `{ column, value }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub value: SortDirection,
}

impl OrderBy {
    pub fn new(column: impl Into<String>, value: SortDirection) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

impl Default for OrderBy {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_COLUMN, SortDirection::Asc)
    }
}

/// Options of the table record set; unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRecordSetOptions {
    pub take: Option<u32>,
    pub skip: Option<u32>,
    pub search_term: Option<String>,
    pub order_by: Option<OrderBy>,
    /// Sent as `where`.
    pub filter: Option<Map<String, Value>>,
}

impl TableRecordSetOptions {
    #[must_use]
    pub fn take(mut self, take: u32) -> Self {
        self.take = Some(take);
        self
    }

    #[must_use]
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    #[must_use]
    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, value: SortDirection) -> Self {
        self.order_by = Some(OrderBy::new(column, value));
        self
    }

    /// Adds one `where` condition.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Variables
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetCompaniesVariables {
    pub take: u32,
    pub skip: u32,
}

impl From<ListOptions> for GetCompaniesVariables {
    fn from(options: ListOptions) -> Self {
        Self {
            take: options.take.unwrap_or(DEFAULT_TAKE),
            skip: options.skip.unwrap_or(DEFAULT_SKIP),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdVariables {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCompanyVariables {
    pub data: NewCompany,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateCompanyVariables {
    pub id: String,
    pub data: CompanyPatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnsVariables {
    pub model_name: String,
}

impl Default for TableColumnsVariables {
    fn default() -> Self {
        Self {
            model_name: MODEL_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDataOptions {
    pub search_term: String,
    pub order_by: OrderBy,
    pub skip: u32,
    pub take: u32,
    #[serde(rename = "where")]
    pub filter: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecordSetVariables {
    pub model_name: String,
    pub table_data_options: TableDataOptions,
}

impl From<TableRecordSetOptions> for TableRecordSetVariables {
    fn from(options: TableRecordSetOptions) -> Self {
        Self {
            model_name: MODEL_NAME.to_string(),
            table_data_options: TableDataOptions {
                search_term: options.search_term.unwrap_or_default(),
                order_by: options.order_by.unwrap_or_default(),
                skip: options.skip.unwrap_or(DEFAULT_SKIP),
                take: options.take.unwrap_or(DEFAULT_TAKE),
                filter: options.filter.unwrap_or_default(),
            },
        }
    }
}
