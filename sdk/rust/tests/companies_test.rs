//! Integration tests for the company façade.

mod support;

use appello_sdk::resources::companies::types::{
    CompanyPatch, ListOptions, NewCompany, SortDirection, TableRecordSetOptions,
};
use serde_json::json;
use support::{MockReply, MockServer};

fn company(id: &str, name: &str, is_archived: bool) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "This is a new company",
        "companyType": "Customer",
        "companyTypeId": "type-1",
        "isArchived": is_archived
    })
}

/// getList() with no options sends take=10, skip=0
#[tokio::test]
async fn test_get_list_defaults() {
    let server = MockServer::start().await;
    let client = server.authenticated_client().await;
    server.enqueue(
        "/graphql",
        MockReply::data(json!({
            "companies": { "data": [{ "id": "c1", "name": "Acme" }, { "id": "c2", "name": "Globex" }] }
        })),
    );

    let response = client
        .companies()
        .get_list(ListOptions::default())
        .await
        .unwrap();

    let page = response.data.unwrap().companies.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].id, "c1");

    let request = server.last_request_to("/graphql");
    assert_eq!(request.variables(), &json!({ "take": 10, "skip": 0 }));
    assert_eq!(request.token.as_deref(), Some("user-tok"));
    assert!(request.query().starts_with("query GetCompanies"));
}

/// Explicit paging is passed through
#[tokio::test]
async fn test_get_list_paging() {
    let server = MockServer::start().await;
    server.enqueue("/graphql", MockReply::data(json!({ "companies": { "data": [] } })));

    server
        .client()
        .companies()
        .get_list(ListOptions::default().take(25).skip(50))
        .await
        .unwrap();

    assert_eq!(
        server.last_request_to("/graphql").variables(),
        &json!({ "take": 25, "skip": 50 })
    );
}

/// getRecord decodes the company
#[tokio::test]
async fn test_get_record() {
    let server = MockServer::start().await;
    server.enqueue(
        "/graphql",
        MockReply::data(json!({ "company": company("c1", "Acme", false) })),
    );

    let response = server.client().companies().get_record("c1").await.unwrap();
    let record = response.data.unwrap().company.unwrap();

    assert_eq!(record.name, "Acme");
    assert_eq!(record.company_type_id.as_deref(), Some("type-1"));
    assert!(!record.is_archived);
    assert_eq!(server.last_request_to("/graphql").variables(), &json!({ "id": "c1" }));
}

/// Errors pass through the façade untouched
#[tokio::test]
async fn test_facade_returns_errors_in_envelope() {
    let server = MockServer::start().await;
    server.enqueue(
        "/graphql",
        MockReply::json(json!({
            "data": { "company": null },
            "errors": [{ "message": "Company not found", "path": ["company"] }]
        })),
    );

    let response = server.client().companies().get_record("missing").await.unwrap();

    assert!(response.has_errors());
    assert_eq!(response.first_error_message(), Some("Company not found"));
    assert_eq!(response.data.unwrap().company, None);
}

/// create → update → archive → restore → delete
#[tokio::test]
async fn test_record_lifecycle() {
    let server = MockServer::start().await;
    let client = server.authenticated_client().await;
    let companies = client.companies();

    server.enqueue(
        "/graphql",
        MockReply::data(json!({ "createCompany": company("new-1", "New Company", false) })),
    );
    let created = companies
        .create_record(NewCompany {
            name: "New Company".to_string(),
            description: "This is a new company".to_string(),
            company_type_id: "type-1".to_string(),
        })
        .await
        .unwrap();
    let id = created.data.unwrap().create_company.unwrap().id;
    assert_eq!(id, "new-1");
    assert_eq!(
        server.last_request_to("/graphql").variables(),
        &json!({
            "data": {
                "name": "New Company",
                "description": "This is a new company",
                "companyTypeId": "type-1"
            }
        })
    );

    server.enqueue(
        "/graphql",
        MockReply::data(json!({ "editCompany": company("new-1", "Updated Company", false) })),
    );
    let updated = companies
        .update_record(&id, CompanyPatch::default().name("Updated Company"))
        .await
        .unwrap();
    assert_eq!(updated.data.unwrap().edit_company.unwrap().name, "Updated Company");
    let request = server.last_request_to("/graphql");
    assert_eq!(
        request.variables(),
        &json!({ "id": "new-1", "data": { "name": "Updated Company" } })
    );
    assert!(request.query().contains("editCompany(id: $id, data: $data)"));

    server.enqueue(
        "/graphql",
        MockReply::data(json!({
            "archiveCompany": { "id": "new-1", "name": "Updated Company", "isArchived": true }
        })),
    );
    let archived = companies.archive_record(&id).await.unwrap();
    assert!(archived.data.unwrap().archive_company.unwrap().is_archived);

    server.enqueue(
        "/graphql",
        MockReply::data(json!({
            "restoreCompany": { "id": "new-1", "name": "Updated Company", "isArchived": false }
        })),
    );
    let restored = companies.restore_record(&id).await.unwrap();
    assert!(!restored.data.unwrap().restore_company.unwrap().is_archived);

    server.enqueue("/graphql", MockReply::data(json!({ "deleteCompany": true })));
    let deleted = companies.delete_record(&id).await.unwrap();
    assert!(deleted.data.unwrap().succeeded());
    assert_eq!(server.last_request_to("/graphql").variables(), &json!({ "id": "new-1" }));

    // login + five façade calls, all with the user token after login
    let graphql = server.requests_to("/graphql");
    assert_eq!(graphql.len(), 6);
    assert!(graphql[1..]
        .iter()
        .all(|r| r.token.as_deref() == Some("user-tok")));
}

/// Table columns are requested for the Company model
#[tokio::test]
async fn test_get_table_columns() {
    let server = MockServer::start().await;
    server.enqueue(
        "/graphql",
        MockReply::data(json!({
            "tableData": {
                "columns": [
                    {
                        "id": "name", "label": "Name", "type": "string", "isUnique": true,
                        "listValues": [], "isForeignKey": false,
                        "referenceModel": null, "referenceColumn": null
                    },
                    {
                        "id": "companyType", "label": "Type", "type": "list", "isUnique": false,
                        "listValues": [{ "value": "type-1", "label": "Customer" }],
                        "isForeignKey": true,
                        "referenceModel": "CompanyType", "referenceColumn": "id"
                    }
                ]
            }
        })),
    );

    let response = server.client().companies().get_table_columns().await.unwrap();
    let columns = response.data.unwrap().table_data.unwrap().columns;

    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].column_type, "string");
    assert_eq!(columns[1].list_values[0].label, "Customer");
    assert_eq!(columns[1].reference_model.as_deref(), Some("CompanyType"));
    assert_eq!(
        server.last_request_to("/graphql").variables(),
        &json!({ "modelName": "Company" })
    );
}

/// getTableRecordSet() with no options sends the documented defaults
#[tokio::test]
async fn test_get_table_record_set_defaults() {
    let server = MockServer::start().await;
    server.enqueue(
        "/graphql",
        MockReply::data(json!({ "tableData": { "recordCount": 0, "recordSet": [] } })),
    );

    let response = server
        .client()
        .companies()
        .get_table_record_set(TableRecordSetOptions::default())
        .await
        .unwrap();

    assert_eq!(response.data.unwrap().table_data.unwrap().record_count, 0);
    assert_eq!(
        server.last_request_to("/graphql").variables(),
        &json!({
            "modelName": "Company",
            "tableDataOptions": {
                "searchTerm": "",
                "orderBy": { "column": "name", "value": "asc" },
                "skip": 0,
                "take": 10,
                "where": {}
            }
        })
    );
}

/// Filtered, sorted record set
#[tokio::test]
async fn test_get_table_record_set_with_options() {
    let server = MockServer::start().await;
    server.enqueue(
        "/graphql",
        MockReply::data(json!({
            "tableData": {
                "recordCount": 1,
                "recordSet": [{
                    "id": "c1",
                    "name": "Acme",
                    "createdAt": "2024-03-01T10:00:00.000Z",
                    "updatedAt": "2024-03-02T10:00:00.000Z",
                    "isDeleted": false,
                    "isArchived": false,
                    "companyType": { "id": "type-1", "label": "Customer", "slug": "customer" },
                    "phoneHQ": null
                }]
            }
        })),
    );

    let options = TableRecordSetOptions::default()
        .take(3)
        .order_by("createdAt", SortDirection::Desc)
        .filter("isArchived", false)
        .filter("companyType", "type-1");
    let response = server
        .client()
        .companies()
        .get_table_record_set(options)
        .await
        .unwrap();

    let set = response.data.unwrap().table_data.unwrap();
    assert_eq!(set.record_count, 1);
    assert_eq!(set.record_set[0].company_type.as_ref().unwrap().id, "type-1");

    let variables = server.last_request_to("/graphql").variables().clone();
    assert_eq!(variables["tableDataOptions"]["take"], 3);
    assert_eq!(
        variables["tableDataOptions"]["orderBy"],
        json!({ "column": "createdAt", "value": "desc" })
    );
    assert_eq!(
        variables["tableDataOptions"]["where"],
        json!({ "isArchived": false, "companyType": "type-1" })
    );
}

/// `{ "data": { root: null }, "errors": [...] }` as a failed operation answers
fn failure(root: &str, message: &str) -> MockReply {
    MockReply::json(json!({
        "data": { root: null },
        "errors": [{ "message": message, "path": [root] }]
    }))
}

/// Failed mutations come back as envelopes with a null root
#[tokio::test]
async fn test_mutation_errors_return_envelope() {
    let server = MockServer::start().await;
    let client = server.client();
    let companies = client.companies();

    server.enqueue("/graphql", failure("createCompany", "Company type not found"));
    let created = companies
        .create_record(NewCompany {
            name: "New Company".to_string(),
            description: String::new(),
            company_type_id: "missing".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.first_error_message(), Some("Company type not found"));
    assert_eq!(created.data.unwrap().create_company, None);

    server.enqueue("/graphql", failure("editCompany", "Company not found"));
    let updated = companies
        .update_record("missing", CompanyPatch::default().name("x"))
        .await
        .unwrap();
    assert_eq!(updated.first_error_message(), Some("Company not found"));
    assert_eq!(updated.data.unwrap().edit_company, None);

    server.enqueue("/graphql", failure("archiveCompany", "Company not found"));
    let archived = companies.archive_record("missing").await.unwrap();
    assert!(archived.has_errors());
    assert_eq!(archived.data.unwrap().archive_company, None);

    server.enqueue("/graphql", failure("restoreCompany", "Company not found"));
    let restored = companies.restore_record("missing").await.unwrap();
    assert!(restored.has_errors());
    assert_eq!(restored.data.unwrap().restore_company, None);

    server.enqueue("/graphql", failure("deleteCompany", "Company not found"));
    let deleted = companies.delete_record("missing").await.unwrap();
    assert!(deleted.has_errors());
    assert!(!deleted.data.unwrap().succeeded());
}

/// Failed reads come back as envelopes with a null root
#[tokio::test]
async fn test_query_errors_return_envelope() {
    let server = MockServer::start().await;
    let client = server.client();
    let companies = client.companies();

    server.enqueue("/graphql", failure("companies", "Not authorized"));
    let list = companies.get_list(ListOptions::default()).await.unwrap();
    assert_eq!(list.first_error_message(), Some("Not authorized"));
    assert_eq!(list.data.unwrap().companies, None);

    server.enqueue("/graphql", failure("tableData", "Unknown model"));
    let columns = companies.get_table_columns().await.unwrap();
    assert_eq!(columns.first_error_message(), Some("Unknown model"));
    assert_eq!(columns.data.unwrap().table_data, None);

    server.enqueue("/graphql", failure("tableData", "Unknown column"));
    let records = companies
        .get_table_record_set(TableRecordSetOptions::default())
        .await
        .unwrap();
    assert_eq!(records.first_error_message(), Some("Unknown column"));
    assert_eq!(records.data.unwrap().table_data, None);

    // data: null for the whole response decodes as well
    server.enqueue(
        "/graphql",
        MockReply::json(json!({ "data": null, "errors": [{ "message": "boom" }] })),
    );
    let response = companies.archive_record("c1").await.unwrap();
    assert!(response.data.is_none());
    assert_eq!(response.first_error_message(), Some("boom"));
}
