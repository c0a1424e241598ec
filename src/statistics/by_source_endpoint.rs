//! The endpoint for spending statistics grouped by source.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    transaction::{TransactionFilter, get_transactions_matching},
};

use super::{
    SALE_TYPE,
    aggregate::{Dimension, aggregate},
    params::{QueryParams, parse_date_param},
    response::{SourceBucket, StatisticsResponse},
};

/// A route handler for spending statistics grouped by source.
///
/// Only records of type "Sale" are aggregated. Accepts optional `startDate`
/// and `endDate` bounds (both exclusive).
pub async fn statistics_by_source_endpoint(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, Error> {
    let start_date = parse_date_param(&params, "startDate")?;
    let end_date = parse_date_param(&params, "endDate")?;

    let filter = TransactionFilter {
        start_date,
        end_date,
        category: None,
        type_name: Some(SALE_TYPE.to_string()),
    };

    let connection = state.lock_connection()?;
    let records = get_transactions_matching(&filter, &connection)?;
    drop(connection);

    let Some(summary) = aggregate(&records, Dimension::Source) else {
        return Ok(Json(Vec::<SourceBucket>::new()).into_response());
    };

    let response = StatisticsResponse::new(summary, params, |group| SourceBucket {
        source: group.key,
        amount: group.amount,
    });

    Ok(Json(response).into_response())
}
