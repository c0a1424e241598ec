//! The endpoint for partially updating a transaction.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{AppState, Error};

use super::{Transaction, TransactionId, TransactionUpdate, update_transaction};

/// A route handler for applying a partial update to a transaction.
///
/// Only the fields present in the request body are overwritten; the audit
/// fields are always refreshed. Returns the updated record.
pub async fn update_transaction_endpoint(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
    Json(update): Json<TransactionUpdate>,
) -> Result<Json<Transaction>, Error> {
    let update = update.sanitized();

    let connection = state.lock_connection()?;
    let transaction = update_transaction(transaction_id, &update, &connection)?;

    Ok(Json(transaction))
}
