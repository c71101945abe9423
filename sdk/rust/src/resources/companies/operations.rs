//! GraphQL documents of the company resource.

use super::types::{
    ArchiveCompanyData, CreateCompanyData, CreateCompanyVariables, DeleteCompanyData,
    GetCompaniesData, GetCompaniesVariables, GetCompanyData, IdVariables, RestoreCompanyData,
    TableColumnsData, TableColumnsVariables, TableRecordSetData, TableRecordSetVariables,
    UpdateCompanyData, UpdateCompanyVariables,
};
use crate::typed::{OperationKind, TypedOperation};

/// Declares a unit struct implementing [`TypedOperation`].
macro_rules! operation {
    ($(#[$meta:meta])* $name:ident, $kind:ident, $vars:ty => $data:ty, $document:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl TypedOperation for $name {
            type Variables = $vars;
            type Response = $data;

            const OPERATION: &'static str = $document;
            const OPERATION_NAME: &'static str = stringify!($name);
            const KIND: OperationKind = OperationKind::$kind;
        }
    };
}

operation!(
    /// Page of company ids and names.
    GetCompanies, Query, GetCompaniesVariables => GetCompaniesData,
    r"query GetCompanies($take: Int, $skip: Int) {
    companies(options: { take: $take, skip: $skip }) {
        data {
            ... on Company {
                id
                name
            }
        }
    }
}"
);

operation!(
    /// Single company by id.
    GetCompany, Query, IdVariables => GetCompanyData,
    r"query GetCompany($id: ID!) {
    company(id: $id) {
        id
        name
        description
        companyType
        companyTypeId
        isArchived
    }
}"
);

operation!(
    CreateCompany, Mutation, CreateCompanyVariables => CreateCompanyData,
    r"mutation CreateCompany($data: CreateCompany!) {
    createCompany(data: $data) {
        id
        name
        description
        companyType
        companyTypeId
        isArchived
    }
}"
);

operation!(
    /// Partial update; the server merges only the fields sent.
    UpdateCompany, Mutation, UpdateCompanyVariables => UpdateCompanyData,
    r"mutation UpdateCompany($id: String!, $data: EditCompany!) {
    editCompany(id: $id, data: $data) {
        id
        name
        description
        companyType
        companyTypeId
        isArchived
    }
}"
);

operation!(
    DeleteCompany, Mutation, IdVariables => DeleteCompanyData,
    r"mutation DeleteCompany($id: String!) {
    deleteCompany(id: $id)
}"
);

operation!(
    ArchiveCompany, Mutation, IdVariables => ArchiveCompanyData,
    r"mutation ArchiveCompany($id: ID!) {
    archiveCompany(id: $id) {
        id
        name
        isArchived
    }
}"
);

operation!(
    RestoreCompany, Mutation, IdVariables => RestoreCompanyData,
    r"mutation RestoreCompany($id: ID!) {
    restoreCompany(id: $id) {
        id
        name
        isArchived
    }
}"
);

operation!(
    /// Column metadata of the company table.
    GetCompanyTableDataColumns, Query, TableColumnsVariables => TableColumnsData,
    r"query GetCompanyTableDataColumns($modelName: TableDataName!) {
    tableData(modelName: $modelName) {
        columns
    }
}"
);

operation!(
    /// Filtered, sorted, paged rows of the company table.
    GetCompanyTableDataRecordSet, Query, TableRecordSetVariables => TableRecordSetData,
    r"query GetCompanyTableDataRecordSet(
    $modelName: TableDataName!
    $tableDataOptions: TableDataRecordSetOptions
) {
    tableData(modelName: $modelName, options: $tableDataOptions) {
        recordCount
        recordSet
    }
}"
);
