//! The endpoint for listing transactions.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{AppState, Error};

use super::{Period, Transaction, get_transactions_on_or_after};

/// The query parameters accepted by the transaction listing endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ListTransactionsQuery {
    period: Option<String>,
}

/// A route handler for listing transactions, optionally restricted to a
/// trailing window ending today (`?period=1Mo|3Mo|6Mo|1Yr|3Yr|5Yr|All`).
pub async fn list_transactions_endpoint(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let period = Period::parse(query.period.as_deref());
    let start = period.start_date(OffsetDateTime::now_utc().date());

    let connection = state.lock_connection()?;
    let transactions = get_transactions_on_or_after(start, &connection)?;

    Ok(Json(transactions))
}
