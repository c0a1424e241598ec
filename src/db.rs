//! Database initialization for the application's domain models.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, lookup::create_lookup_tables, transaction::create_transaction_table,
};

/// Create the application's tables if they do not exist.
///
/// Foreign key enforcement is switched on for the connection so that
/// transactions cannot reference nonexistent lookup rows and lookup rows
/// that are still referenced cannot be deleted.
///
/// # Errors
/// Returns an error if any of the tables cannot be created or if there is
/// an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // PRAGMA foreign_keys is a no-op inside a transaction, so set it first.
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_lookup_tables(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
