//! Demonstration sequence against a live API.
//!
//! Walks a company through its whole lifecycle, printing every envelope.
//! Steps that feed a later step stop the sequence when their data is missing.

use crate::print_envelope;
use appello_sdk::resources::companies::types::{
    CompanyPatch, ListOptions, NewCompany, SortDirection, TableRecordSetOptions,
};
use appello_sdk::{AppelloClient, NoVariables, Response};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

const ME_QUERY: &str = "{ me { id emailAddress fullName } }";

type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Runs every step in order. Returns 1 when any envelope carried errors.
pub async fn run(client: &AppelloClient) -> DemoResult<i32> {
    let companies = client.companies();
    let mut failed = false;

    let me: Response<Value> = client.query(ME_QUERY, NoVariables::default()).await?;
    failed |= show("Current User", &me)?;

    let list = companies.get_list(ListOptions::default()).await?;
    failed |= show("Companies List", &list)?;
    let first_id = list
        .data
        .and_then(|data| data.companies)
        .and_then(|page| page.data.into_iter().next())
        .map(|company| company.id)
        .ok_or("no companies returned")?;
    debug!(id = %first_id, "picked first company");

    let record = companies.get_record(&first_id).await?;
    failed |= show("Company Record", &record)?;
    let company_type_id = record
        .data
        .and_then(|data| data.company)
        .and_then(|company| company.company_type_id)
        .ok_or("company has no type")?;

    let created = companies
        .create_record(NewCompany {
            name: format!("New Company - {}", unix_seconds()),
            description: "This is a new company".to_string(),
            company_type_id: company_type_id.clone(),
        })
        .await?;
    failed |= show("New Company Record", &created)?;
    let new_id = created
        .data
        .and_then(|data| data.create_company)
        .map(|company| company.id)
        .ok_or("company was not created")?;
    info!(id = %new_id, "created company");

    let updated = companies
        .update_record(
            &new_id,
            CompanyPatch::default().name(format!("Updated Company - {}", unix_seconds())),
        )
        .await?;
    failed |= show("Updated Company Record", &updated)?;

    let archived = companies.archive_record(&new_id).await?;
    failed |= show("Archived Company Record", &archived)?;

    let restored = companies.restore_record(&new_id).await?;
    failed |= show("Restored Company Record", &restored)?;

    let deleted = companies.delete_record(&new_id).await?;
    failed |= show("Deleted Company Record", &deleted)?;

    let columns = companies.get_table_columns().await?;
    failed |= show("Company Table Columns", &columns)?;

    let options = TableRecordSetOptions::default()
        .take(3)
        .filter("isArchived", false)
        .filter("companyType", company_type_id)
        .order_by("createdAt", SortDirection::Desc);
    let record_set = companies.get_table_record_set(options).await?;
    failed |= show("Company Table Record Set", &record_set)?;

    println!("Done");
    Ok(i32::from(failed))
}

fn show<T: serde::Serialize>(label: &str, response: &Response<T>) -> DemoResult<bool> {
    print_envelope(label, response)?;
    Ok(response.has_errors())
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
