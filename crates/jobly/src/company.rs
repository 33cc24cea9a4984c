//! Company records.
//!
//! Table layout:
//!
//! ```sql
//! CREATE TABLE companies (
//!     handle        VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
//!     name          TEXT UNIQUE NOT NULL,
//!     num_employees INTEGER CHECK (num_employees >= 0),
//!     description   TEXT NOT NULL,
//!     logo_url      TEXT
//! );
//! ```
//!
//! All functions take `&impl GenericClient`, so they work on a pooled
//! connection as well as inside a transaction. Input is expected to be
//! validated by the caller.

use crate::client::GenericClient;
use crate::columns::ColumnMap;
use crate::error::{JoblyError, JoblyResult};
use crate::row::{FromRow, RowExt};
use crate::sql::{FieldUpdates, FilterCriteria, build_set_clause, build_where_clause};
use crate::trace;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Columns returned by every company query.
pub const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// API field names that differ from their column names, for partial updates.
pub const COMPANY_UPDATE_COLUMNS: ColumnMap = ColumnMap::new(&[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

/// Columns the list filters apply to.
pub const COMPANY_FILTER_COLUMNS: ColumnMap = ColumnMap::new(&[
    ("minBound", "num_employees"),
    ("maxBound", "num_employees"),
    ("namePattern", "name"),
]);

/// A company as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// Payload for [`create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Insert a company and return it.
///
/// Returns [`JoblyError::Duplicate`] if the handle is already taken.
pub async fn create(conn: &impl GenericClient, data: &NewCompany) -> JoblyResult<Company> {
    let check_sql = "SELECT handle FROM companies WHERE handle = $1";
    trace::statement("companies.create.check", check_sql, 1);
    if conn.query_opt(check_sql, &[&data.handle]).await?.is_some() {
        return Err(JoblyError::duplicate(format!(
            "Duplicate company: {}",
            data.handle
        )));
    }

    let sql = format!(
        "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {COMPANY_COLUMNS}"
    );
    let params: [&(dyn ToSql + Sync); 5] = [
        &data.handle,
        &data.name,
        &data.description,
        &data.num_employees,
        &data.logo_url,
    ];
    trace::statement("companies.create", &sql, params.len());
    let row = conn.query_one(&sql, &params).await?;
    Company::from_row(&row)
}

/// List companies ordered by name, narrowed by `criteria`.
///
/// Empty criteria list every company. A fractional bound fails with
/// [`JoblyError::InvalidInput`] because `num_employees` is an integer column.
pub async fn find_all(
    conn: &impl GenericClient,
    criteria: &FilterCriteria,
) -> JoblyResult<Vec<Company>> {
    let clause = build_where_clause(criteria, &COMPANY_FILTER_COLUMNS);

    let mut sql = format!("SELECT {COMPANY_COLUMNS} FROM companies");
    if let Some(clause) = &clause {
        sql.push(' ');
        sql.push_str(&clause.fragment);
    }
    sql.push_str(" ORDER BY name");

    let params = clause.as_ref().map(|c| c.params_ref()).unwrap_or_default();
    trace::statement("companies.find_all", &sql, params.len());
    let rows = conn.query(&sql, &params).await?;
    rows.iter().map(Company::from_row).collect()
}

/// Fetch one company by handle.
///
/// Returns [`JoblyError::NotFound`] if there is no such company.
pub async fn get(conn: &impl GenericClient, handle: &str) -> JoblyResult<Company> {
    let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1");
    trace::statement("companies.get", &sql, 1);
    let row = conn
        .query_opt(&sql, &[&handle])
        .await?
        .ok_or_else(|| not_found(handle))?;
    Company::from_row(&row)
}

/// Apply a partial update and return the updated company.
///
/// Only the supplied fields change. Field names use the API spelling
/// (`numEmployees`, `logoUrl`); see [`COMPANY_UPDATE_COLUMNS`].
///
/// Returns [`JoblyError::InvalidInput`] for an empty update or for a value
/// that does not fit its column (`"five"` or `2.5` for `numEmployees`), and
/// [`JoblyError::NotFound`] if there is no such company.
pub async fn update(
    conn: &impl GenericClient,
    handle: &str,
    data: &FieldUpdates,
) -> JoblyResult<Company> {
    let set = build_set_clause(data, &COMPANY_UPDATE_COLUMNS)?;
    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${} RETURNING {COMPANY_COLUMNS}",
        set.fragment,
        set.next_placeholder()
    );

    let mut params = set.params_ref();
    params.push(&handle);
    trace::statement("companies.update", &sql, params.len());
    let row = conn
        .query_opt(&sql, &params)
        .await?
        .ok_or_else(|| not_found(handle))?;
    Company::from_row(&row)
}

/// Delete a company.
///
/// Returns [`JoblyError::NotFound`] if there is no such company.
pub async fn remove(conn: &impl GenericClient, handle: &str) -> JoblyResult<()> {
    let sql = "DELETE FROM companies WHERE handle = $1 RETURNING handle";
    trace::statement("companies.remove", sql, 1);
    conn.query_opt(sql, &[&handle])
        .await?
        .map(|_| ())
        .ok_or_else(|| not_found(handle))
}

fn not_found(handle: &str) -> JoblyError {
    JoblyError::not_found(format!("No company: {handle}"))
}
