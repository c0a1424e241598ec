//! The API endpoint URIs.
//!
//! For endpoints that take an ID parameter, e.g., '/transaction/{transaction_id}',
//! use [format_endpoint].

/// The root route which returns a welcome message.
pub const ROOT: &str = "/";
/// The route to list and batch-create transactions.
pub const TRANSACTIONS: &str = "/transaction";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/transaction/{transaction_id}";
/// The route to list and create transaction categories.
pub const TRANSACTION_CATEGORIES: &str = "/transaction_category";
/// The route to update or delete a single transaction category by name.
pub const TRANSACTION_CATEGORY: &str = "/transaction_category/{name}";
/// The route to list and create transaction types.
pub const TRANSACTION_TYPES: &str = "/transaction_type";
/// The route to update or delete a single transaction type by name.
pub const TRANSACTION_TYPE: &str = "/transaction_type/{name}";
/// The route to list and create transaction sources.
pub const TRANSACTION_SOURCES: &str = "/transaction_source";
/// The route to update or delete a single transaction source by name.
pub const TRANSACTION_SOURCE: &str = "/transaction_source/{name}";
/// The route for spending statistics grouped by secondary category.
pub const STATISTICS_BY_CATEGORY: &str = "/statistics_by_category";
/// The route for spending statistics grouped by date bucket.
pub const STATISTICS_BY_DATE: &str = "/statistics_by_date";
/// The route for spending statistics grouped by source.
pub const STATISTICS_BY_SOURCE: &str = "/statistics_by_source";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/transaction/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        for uri in [
            endpoints::ROOT,
            endpoints::TRANSACTIONS,
            endpoints::TRANSACTION_CATEGORIES,
            endpoints::TRANSACTION_TYPES,
            endpoints::TRANSACTION_SOURCES,
            endpoints::STATISTICS_BY_CATEGORY,
            endpoints::STATISTICS_BY_DATE,
            endpoints::STATISTICS_BY_SOURCE,
        ] {
            assert_endpoint_is_valid_uri(uri);
        }
    }

    #[test]
    fn format_endpoint_replaces_parameter() {
        let got = format_endpoint(endpoints::TRANSACTION, 42);

        assert_eq!(got, "/transaction/42");
        assert_endpoint_is_valid_uri(&got);
    }

    #[test]
    fn format_endpoint_without_parameter_returns_path_unchanged() {
        let got = format_endpoint(endpoints::TRANSACTIONS, 42);

        assert_eq!(got, endpoints::TRANSACTIONS);
    }
}
