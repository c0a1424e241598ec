//! The endpoint for spending statistics grouped into date buckets.

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
    aggregate::{Dimension, Granularity, aggregate},
    params::{QueryParams, parse_date_param},
    response::{DateBucket, StatisticsResponse},
};

/// A route handler for spending statistics grouped into date buckets.
///
/// The `by` query parameter is required and selects the bucket size
/// (year, month, day, or quarter). It is validated before any other
/// parameter so a bad granularity is reported even alongside bad dates.
pub async fn statistics_by_date_endpoint(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, Error> {
    let granularity = Granularity::parse(params.get("by").map(String::as_str))?;
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

    let Some(summary) = aggregate(&records, Dimension::Date(granularity)) else {
        return Ok(Json(Vec::<DateBucket>::new()).into_response());
    };

    let response = StatisticsResponse::new(summary, params, |group| DateBucket {
        date: group.key,
        amount: group.amount,
    });

    Ok(Json(response).into_response())
}
