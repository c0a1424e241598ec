//! Transaction management for the spending analysis backend.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, create/update payloads, and database functions
//! - The filtered query builder used by the statistics endpoints
//! - The CRUD route handlers

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod period;
mod query;
mod update_endpoint;

pub use core::{
    NewTransaction, SYSTEM_ACTOR, Transaction, TransactionId, TransactionUpdate,
    create_transaction, create_transaction_table, delete_transaction, get_transaction,
    map_transaction_row, update_transaction,
};
pub use create_endpoint::create_transactions_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use period::Period;
pub use query::{TransactionFilter, get_transactions_matching, get_transactions_on_or_after};
pub use update_endpoint::update_transaction_endpoint;
