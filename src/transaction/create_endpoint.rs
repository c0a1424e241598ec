//! The endpoint for batch-creating transactions.

use axum::{Json, extract::State, http::StatusCode};
use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    AppState, Error,
    lookup::{LookupKind, ensure_entry},
};

use super::{NewTransaction, Transaction, create_transaction};

/// A route handler for creating transactions from a JSON array.
///
/// The whole batch runs inside a single SQLite transaction: either every
/// record is inserted or none are. Category, type, and source names that do
/// not exist yet are created as lookup rows before the insert, so bulk
/// uploads never fail on missing lookups.
pub async fn create_transactions_endpoint(
    State(state): State<AppState>,
    Json(new_transactions): Json<Vec<NewTransaction>>,
) -> Result<(StatusCode, Json<Vec<Transaction>>), Error> {
    let connection = state.lock_connection()?;
    let sql_transaction =
        SqlTransaction::new_unchecked(&connection, TransactionBehavior::Immediate)?;

    let mut created = Vec::with_capacity(new_transactions.len());

    for new_transaction in new_transactions {
        let new_transaction = new_transaction.sanitized();
        ensure_lookup_rows(&new_transaction, &sql_transaction)?;
        created.push(create_transaction(&new_transaction, &sql_transaction)?);
    }

    // Dropping the transaction without committing rolls the batch back, so
    // an error on any record leaves the database untouched.
    sql_transaction.commit()?;

    tracing::info!("created {} transactions", created.len());

    Ok((StatusCode::CREATED, Json(created)))
}

fn ensure_lookup_rows(
    new_transaction: &NewTransaction,
    connection: &Connection,
) -> Result<(), Error> {
    for category in [
        &new_transaction.category_level1,
        &new_transaction.category_level2,
    ]
    .into_iter()
    .flatten()
    {
        ensure_entry(LookupKind::Category, category, connection)?;
    }
    if let Some(ref type_name) = new_transaction.type_name {
        ensure_entry(LookupKind::Type, type_name, connection)?;
    }
    if let Some(ref source) = new_transaction.source {
        ensure_entry(LookupKind::Source, source, connection)?;
    }

    Ok(())
}
