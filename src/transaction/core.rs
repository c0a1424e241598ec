//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row, ToSql};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::Error;

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// The actor name recorded in the audit fields by the write path.
pub const SYSTEM_ACTOR: &str = "system";

/// The column list shared by the queries that materialize [Transaction] rows.
pub(crate) const TRANSACTION_COLUMNS: &str = "id, date, description, notes, category_level1, \
     category_level2, \"type\", amount, source, created_at, created_by, modified_at, modified_by";

/// A single financial transaction, e.g. a sale or an expense.
///
/// The audit fields (`created_*`, `modified_*`) are set by the write path
/// and never taken from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database on creation.
    pub id: TransactionId,
    /// The calendar date the transaction happened on.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// The primary category, referencing a category lookup row by name.
    pub category_level1: Option<String>,
    /// The secondary category, referencing a category lookup row by name.
    pub category_level2: Option<String>,
    /// The transaction type (e.g. "Sale"), referencing a type lookup row by name.
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    /// The monetary amount, signed.
    pub amount: f64,
    /// The source of the transaction, referencing a source lookup row by name.
    pub source: Option<String>,
    /// When the row was created.
    pub created_at: OffsetDateTime,
    /// Who created the row.
    pub created_by: String,
    /// When the row was last modified.
    pub modified_at: OffsetDateTime,
    /// Who last modified the row.
    pub modified_by: String,
}

/// The payload for creating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The calendar date the transaction happened on.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// The primary category name.
    #[serde(default)]
    pub category_level1: Option<String>,
    /// The secondary category name.
    #[serde(default)]
    pub category_level2: Option<String>,
    /// The transaction type name.
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    /// The monetary amount, signed.
    pub amount: f64,
    /// The source name.
    #[serde(default)]
    pub source: Option<String>,
}

impl NewTransaction {
    /// Convert empty-string lookup references to `None` so they become NULL
    /// in the database instead of dangling foreign keys.
    pub fn sanitized(mut self) -> Self {
        self.notes = self.notes.filter(|text| !text.is_empty());
        self.category_level1 = self.category_level1.filter(|name| !name.is_empty());
        self.category_level2 = self.category_level2.filter(|name| !name.is_empty());
        self.type_name = self.type_name.filter(|name| !name.is_empty());
        self.source = self.source.filter(|name| !name.is_empty());
        self
    }
}

/// A partial update to a transaction.
///
/// Every mutable field is optional: fields absent from the request body are
/// left unchanged. The audit fields are always refreshed by
/// [update_transaction] and cannot be set through this struct.
///
/// Note the contrast with [crate::lookup::LookupUpdate], which replaces its
/// single mutable field wholesale instead of merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    /// A new transaction date.
    #[serde(default)]
    pub date: Option<Date>,
    /// A new description.
    #[serde(default)]
    pub description: Option<String>,
    /// New notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// A new primary category name.
    #[serde(default)]
    pub category_level1: Option<String>,
    /// A new secondary category name.
    #[serde(default)]
    pub category_level2: Option<String>,
    /// A new type name.
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    /// A new amount.
    #[serde(default)]
    pub amount: Option<f64>,
    /// A new source name.
    #[serde(default)]
    pub source: Option<String>,
}

impl TransactionUpdate {
    /// Treat empty-string values as absent so they cannot create dangling
    /// foreign keys.
    pub fn sanitized(mut self) -> Self {
        self.notes = self.notes.filter(|text| !text.is_empty());
        self.category_level1 = self.category_level1.filter(|name| !name.is_empty());
        self.category_level2 = self.category_level2.filter(|name| !name.is_empty());
        self.type_name = self.type_name.filter(|name| !name.is_empty());
        self.source = self.source.filter(|name| !name.is_empty());
        self
    }
}

/// Create a new transaction in the database.
///
/// The audit fields are set to the current UTC time and [SYSTEM_ACTOR].
///
/// # Errors
/// This function will return a:
/// - [Error::ForeignKeyConstraint] if a category, type, or source name does
///   not refer to an existing lookup row,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let now = OffsetDateTime::now_utc();

    let transaction = connection
        .prepare(&format!(
            "INSERT INTO \"transaction\" (date, description, notes, category_level1, \
             category_level2, \"type\", amount, source, created_at, created_by, modified_at, \
             modified_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            (
                &new_transaction.date,
                &new_transaction.description,
                &new_transaction.notes,
                &new_transaction.category_level1,
                &new_transaction.category_level2,
                &new_transaction.type_name,
                new_transaction.amount,
                &new_transaction.source,
                now,
                SYSTEM_ACTOR,
                now,
                SYSTEM_ACTOR,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
        ))?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Apply a partial update to a transaction and return the updated row.
///
/// Only the fields present in `update` are overwritten; the audit fields
/// `modified_at` and `modified_by` are always refreshed.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
/// - [Error::ForeignKeyConstraint] if a new category, type, or source name
///   does not refer to an existing lookup row,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    update: &TransactionUpdate,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let modified_at = OffsetDateTime::now_utc();
    let modified_by = SYSTEM_ACTOR;

    let mut assignments: Vec<&'static str> = Vec::new();
    let mut params: Vec<(&'static str, &dyn ToSql)> = Vec::new();

    if let Some(ref date) = update.date {
        assignments.push("date = :date");
        params.push((":date", date));
    }
    if let Some(ref description) = update.description {
        assignments.push("description = :description");
        params.push((":description", description));
    }
    if let Some(ref notes) = update.notes {
        assignments.push("notes = :notes");
        params.push((":notes", notes));
    }
    if let Some(ref category_level1) = update.category_level1 {
        assignments.push("category_level1 = :category_level1");
        params.push((":category_level1", category_level1));
    }
    if let Some(ref category_level2) = update.category_level2 {
        assignments.push("category_level2 = :category_level2");
        params.push((":category_level2", category_level2));
    }
    if let Some(ref type_name) = update.type_name {
        assignments.push("\"type\" = :type_name");
        params.push((":type_name", type_name));
    }
    if let Some(ref amount) = update.amount {
        assignments.push("amount = :amount");
        params.push((":amount", amount));
    }
    if let Some(ref source) = update.source {
        assignments.push("source = :source");
        params.push((":source", source));
    }

    assignments.push("modified_at = :modified_at");
    params.push((":modified_at", &modified_at));
    assignments.push("modified_by = :modified_by");
    params.push((":modified_by", &modified_by));
    params.push((":id", &id));

    let sql = format!(
        "UPDATE \"transaction\" SET {} WHERE id = :id",
        assignments.join(", ")
    );

    let rows_affected = connection.execute(&sql, params.as_slice())?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    get_transaction(id, connection)
}

/// Delete a transaction by ID.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = :id",
        &[(":id", &id)],
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Create the transaction table in the database.
///
/// The lookup references have no cascade clauses, so deleting a lookup row
/// that is still referenced fails with a foreign key violation.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            notes TEXT,
            category_level1 TEXT REFERENCES category(name),
            category_level2 TEXT REFERENCES category(name),
            type TEXT REFERENCES \"type\"(name),
            amount REAL NOT NULL,
            source TEXT REFERENCES source(name),
            created_at TEXT NOT NULL,
            created_by TEXT NOT NULL,
            modified_at TEXT NOT NULL,
            modified_by TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        description: row.get(2)?,
        notes: row.get(3)?,
        category_level1: row.get(4)?,
        category_level2: row.get(5)?,
        type_name: row.get(6)?,
        amount: row.get(7)?,
        source: row.get(8)?,
        created_at: row.get(9)?,
        created_by: row.get(10)?,
        modified_at: row.get(11)?,
        modified_by: row.get(12)?,
    })
}
