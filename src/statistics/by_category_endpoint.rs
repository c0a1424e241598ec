//! The endpoint for spending statistics grouped by secondary category.

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
    response::{CategoryBucket, StatisticsResponse},
};

/// A route handler for spending statistics grouped by secondary category.
///
/// Only records of type "Sale" are aggregated. Accepts optional `startDate`
/// and `endDate` bounds (both exclusive) and an optional exact-match
/// `category` filter. Responds with a bare empty list when no records
/// match, rather than a zero-filled summary.
pub async fn statistics_by_category_endpoint(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, Error> {
    let start_date = parse_date_param(&params, "startDate")?;
    let end_date = parse_date_param(&params, "endDate")?;
    let category = params
        .get("category")
        .filter(|value| !value.is_empty())
        .cloned();

    let filter = TransactionFilter {
        start_date,
        end_date,
        category,
        type_name: Some(SALE_TYPE.to_string()),
    };

    let connection = state.lock_connection()?;
    let records = get_transactions_matching(&filter, &connection)?;
    drop(connection);

    let Some(summary) = aggregate(&records, Dimension::Category) else {
        return Ok(Json(Vec::<CategoryBucket>::new()).into_response());
    };

    let response = StatisticsResponse::new(summary, params, |group| CategoryBucket {
        category: group.key,
        amount: group.amount,
    });

    Ok(Json(response).into_response())
}
