//! The JSON response shape shared by the statistics endpoints.

use serde::Serialize;

use super::{
    aggregate::{Aggregate, Group},
    params::QueryParams,
};

/// The body of a non-empty statistics response: the summary, the echoed
/// query parameters, and the per-group breakdown.
///
/// `T` is the bucket type naming the grouping dimension in its JSON key
/// ([CategoryBucket], [DateBucket], or [SourceBucket]).
#[derive(Debug, Serialize)]
pub(crate) struct StatisticsResponse<T> {
    pub total: f64,
    pub count: usize,
    pub max: f64,
    pub min: f64,
    pub query: QueryParams,
    pub data: Vec<T>,
}

impl<T> StatisticsResponse<T> {
    /// Build a response from an aggregate, mapping each group through
    /// `to_bucket` to pick the dimension's JSON key name.
    pub(crate) fn new(
        aggregate: Aggregate,
        query: QueryParams,
        to_bucket: impl Fn(Group) -> T,
    ) -> Self {
        Self {
            total: aggregate.total,
            count: aggregate.count,
            max: aggregate.max,
            min: aggregate.min,
            query,
            data: aggregate.groups.into_iter().map(to_bucket).collect(),
        }
    }
}

/// One group of the by-category breakdown.
#[derive(Debug, Serialize)]
pub(crate) struct CategoryBucket {
    pub category: String,
    pub amount: f64,
}

/// One group of the by-date breakdown.
#[derive(Debug, Serialize)]
pub(crate) struct DateBucket {
    pub date: String,
    pub amount: f64,
}

/// One group of the by-source breakdown.
#[derive(Debug, Serialize)]
pub(crate) struct SourceBucket {
    pub source: String,
    pub amount: f64,
}
