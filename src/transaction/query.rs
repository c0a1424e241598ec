//! Database query helpers for filtering transactions.

use rusqlite::{Connection, ToSql};
use time::Date;

use crate::Error;

use super::core::{TRANSACTION_COLUMNS, Transaction, map_transaction_row};

/// The optional filters that narrow a statistics query down to a record set.
///
/// All supplied filters are combined with AND semantics; absent filters
/// impose no constraint.
///
/// The date bounds are both exclusive (`date > start`, `date < end`);
/// clients that want an inclusive range must widen the bounds by a day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Only match transactions strictly after this date.
    pub start_date: Option<Date>,
    /// Only match transactions strictly before this date.
    pub end_date: Option<Date>,
    /// Only match transactions with this exact secondary category name.
    pub category: Option<String>,
    /// Only match transactions with this exact type name.
    pub type_name: Option<String>,
}

/// Get the transactions matching `filter`, ordered by date and then ID.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails or a row cannot be mapped.
pub fn get_transactions_matching(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut clauses: Vec<&'static str> = Vec::new();
    let mut params: Vec<(&'static str, &dyn ToSql)> = Vec::new();

    if let Some(ref start_date) = filter.start_date {
        clauses.push("date > :start_date");
        params.push((":start_date", start_date));
    }
    if let Some(ref end_date) = filter.end_date {
        clauses.push("date < :end_date");
        params.push((":end_date", end_date));
    }
    if let Some(ref category) = filter.category {
        clauses.push("category_level2 = :category");
        params.push((":category", category));
    }
    if let Some(ref type_name) = filter.type_name {
        clauses.push("\"type\" = :type_name");
        params.push((":type_name", type_name));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {} ", clauses.join(" AND "))
    };

    // Sort by date, and then ID to keep the order stable after updates.
    let sql = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" {where_clause}ORDER BY date ASC, id ASC"
    );

    connection
        .prepare(&sql)?
        .query_map(params.as_slice(), map_transaction_row)?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

/// Get the transactions dated on or after `start`, ordered by date and then
/// ID. `None` returns every transaction.
///
/// This is the inclusive variant used by the transaction listing endpoint's
/// trailing period windows; the statistics endpoints use the exclusive
/// bounds of [TransactionFilter] instead.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails or a row cannot be mapped.
pub fn get_transactions_on_or_after(
    start: Option<Date>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let where_clause = match start {
        Some(_) => "WHERE date >= :start ",
        None => "",
    };
    let sql = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" {where_clause}ORDER BY date ASC, id ASC"
    );

    let mut statement = connection.prepare(&sql)?;
    let rows = match start {
        Some(ref start) => statement.query_map(&[(":start", start)], map_transaction_row)?,
        None => statement.query_map([], map_transaction_row)?,
    };

    rows.map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}
