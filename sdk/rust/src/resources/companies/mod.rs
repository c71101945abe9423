//! Company resource.
//!
//! [`Companies`] binds each fixed document to caller-supplied variables and
//! returns the envelope untouched: no validation and no error translation.

pub mod operations;
pub mod types;

use crate::client::AppelloClient;
use crate::error::SdkResult;
use crate::typed::Response;
use operations::{
    ArchiveCompany, CreateCompany, DeleteCompany, GetCompanies, GetCompany,
    GetCompanyTableDataColumns, GetCompanyTableDataRecordSet, RestoreCompany, UpdateCompany,
};
use types::{
    ArchiveCompanyData, CompanyPatch, CreateCompanyData, CreateCompanyVariables,
    DeleteCompanyData, GetCompaniesData, GetCompanyData, IdVariables, ListOptions, NewCompany,
    RestoreCompanyData, TableColumnsData, TableColumnsVariables, TableRecordSetData,
    TableRecordSetOptions, UpdateCompanyData, UpdateCompanyVariables,
};

/// Typed access to companies over a shared client.
#[derive(Debug, Clone, Copy)]
pub struct Companies<'a> {
    client: &'a AppelloClient,
}

impl<'a> Companies<'a> {
    pub fn new(client: &'a AppelloClient) -> Self {
        Self { client }
    }

    /// Lists companies, `take` 10 and `skip` 0 unless set.
    pub async fn get_list(&self, options: ListOptions) -> SdkResult<Response<GetCompaniesData>> {
        self.client.execute::<GetCompanies>(options.into()).await
    }

    pub async fn get_record(&self, id: &str) -> SdkResult<Response<GetCompanyData>> {
        self.client
            .execute::<GetCompany>(IdVariables { id: id.to_string() })
            .await
    }

    pub async fn create_record(&self, data: NewCompany) -> SdkResult<Response<CreateCompanyData>> {
        self.client
            .execute::<CreateCompany>(CreateCompanyVariables { data })
            .await
    }

    /// Sends only the fields set on `data`.
    pub async fn update_record(
        &self,
        id: &str,
        data: CompanyPatch,
    ) -> SdkResult<Response<UpdateCompanyData>> {
        self.client
            .execute::<UpdateCompany>(UpdateCompanyVariables {
                id: id.to_string(),
                data,
            })
            .await
    }

    pub async fn delete_record(&self, id: &str) -> SdkResult<Response<DeleteCompanyData>> {
        self.client
            .execute::<DeleteCompany>(IdVariables { id: id.to_string() })
            .await
    }

    pub async fn archive_record(&self, id: &str) -> SdkResult<Response<ArchiveCompanyData>> {
        self.client
            .execute::<ArchiveCompany>(IdVariables { id: id.to_string() })
            .await
    }

    pub async fn restore_record(&self, id: &str) -> SdkResult<Response<RestoreCompanyData>> {
        self.client
            .execute::<RestoreCompany>(IdVariables { id: id.to_string() })
            .await
    }

    pub async fn get_table_columns(&self) -> SdkResult<Response<TableColumnsData>> {
        self.client
            .execute::<GetCompanyTableDataColumns>(TableColumnsVariables::default())
            .await
    }

    /// Fetches table rows. Defaults: empty search term, sorted by `name`
    /// ascending, `skip` 0, `take` 10, empty `where`.
    pub async fn get_table_record_set(
        &self,
        options: TableRecordSetOptions,
    ) -> SdkResult<Response<TableRecordSetData>> {
        self.client
            .execute::<GetCompanyTableDataRecordSet>(options.into())
            .await
    }
}

impl AppelloClient {
    /// Returns the company façade over this client.
    pub fn companies(&self) -> Companies<'_> {
        Companies::new(self)
    }
}
