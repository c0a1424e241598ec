//! Aggregated spending statistics: summary figures plus a per-group
//! breakdown by category, date bucket, or source.

mod aggregate;
mod by_category_endpoint;
mod by_date_endpoint;
mod by_source_endpoint;
mod params;
mod response;

pub use aggregate::{Aggregate, Dimension, Granularity, Group, aggregate};
pub use by_category_endpoint::statistics_by_category_endpoint;
pub use by_date_endpoint::statistics_by_date_endpoint;
pub use by_source_endpoint::statistics_by_source_endpoint;

/// The record type covered by the statistics endpoints.
pub(crate) const SALE_TYPE: &str = "Sale";
