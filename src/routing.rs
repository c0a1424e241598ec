//! Application router configuration wiring each endpoint URI to its handler.

use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::json;

use crate::{
    AppState, Error, endpoints,
    lookup::{
        create_category_endpoint, create_source_endpoint, create_type_endpoint,
        delete_category_endpoint, delete_source_endpoint, delete_type_endpoint,
        list_categories_endpoint, list_sources_endpoint, list_types_endpoint,
        update_category_endpoint, update_source_endpoint, update_type_endpoint,
    },
    statistics::{
        statistics_by_category_endpoint, statistics_by_date_endpoint,
        statistics_by_source_endpoint,
    },
    transaction::{
        create_transactions_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION_CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::TRANSACTION_CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .route(
            endpoints::TRANSACTION_TYPES,
            get(list_types_endpoint).post(create_type_endpoint),
        )
        .route(
            endpoints::TRANSACTION_TYPE,
            put(update_type_endpoint).delete(delete_type_endpoint),
        )
        .route(
            endpoints::TRANSACTION_SOURCES,
            get(list_sources_endpoint).post(create_source_endpoint),
        )
        .route(
            endpoints::TRANSACTION_SOURCE,
            put(update_source_endpoint).delete(delete_source_endpoint),
        )
        .route(
            endpoints::STATISTICS_BY_CATEGORY,
            get(statistics_by_category_endpoint),
        )
        .route(endpoints::STATISTICS_BY_DATE, get(statistics_by_date_endpoint))
        .route(
            endpoints::STATISTICS_BY_SOURCE,
            get(statistics_by_source_endpoint),
        )
        .fallback(get_unknown_route)
        .with_state(state)
}

/// A route handler for the root path that returns a welcome message.
async fn get_index() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the Spending Analysis API!" }))
}

/// A fallback route handler for unknown paths.
async fn get_unknown_route() -> Error {
    Error::NotFound
}

#[cfg(test)]
mod routing_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, endpoints};

    use super::build_router;

    fn new_test_server() -> TestServer {
        let connection = Connection::open_in_memory().expect("Could not open in-memory database");
        let state = AppState::new(connection).expect("Could not create app state");

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn root_returns_welcome_message() {
        let server = new_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "message": "Welcome to the Spending Analysis API!" })
        );
    }

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let server = new_test_server();

        let response = server.get("/no_such_route").await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }
}
