//! Route handlers for the lookup-table CRUD resources.
//!
//! The category, type, and source resources have identical shapes, so each
//! handler is a thin wrapper that picks the [LookupKind] and delegates to a
//! shared implementation.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{AppState, Error};

use super::{LookupEntry, LookupKind, create_entry, delete_entry, get_all_entries, update_entry};

/// The payload for updating a lookup entry. The name is the key and cannot
/// be changed.
///
/// The description is the entry's only mutable field, so a PUT replaces it
/// wholesale: an absent description clears the stored one. This differs
/// from [crate::transaction::TransactionUpdate], where absent fields are
/// left unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupUpdate {
    /// The new description.
    #[serde(default)]
    pub description: Option<String>,
}

fn list_entries(kind: LookupKind, state: &AppState) -> Result<Json<Vec<LookupEntry>>, Error> {
    let connection = state.lock_connection()?;

    Ok(Json(get_all_entries(kind, &connection)?))
}

fn create_lookup(
    kind: LookupKind,
    state: &AppState,
    entry: &LookupEntry,
) -> Result<(StatusCode, Json<LookupEntry>), Error> {
    let connection = state.lock_connection()?;
    let created = create_entry(kind, entry, &connection)?;

    Ok((StatusCode::CREATED, Json(created)))
}

fn update_lookup(
    kind: LookupKind,
    state: &AppState,
    name: &str,
    update: &LookupUpdate,
) -> Result<Json<LookupEntry>, Error> {
    let connection = state.lock_connection()?;
    let updated = update_entry(kind, name, update.description.as_deref(), &connection)?;

    Ok(Json(updated))
}

fn delete_lookup(kind: LookupKind, state: &AppState, name: &str) -> Result<StatusCode, Error> {
    let connection = state.lock_connection()?;
    delete_entry(kind, name, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

/// A route handler for listing all transaction categories.
pub async fn list_categories_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Vec<LookupEntry>>, Error> {
    list_entries(LookupKind::Category, &state)
}

/// A route handler for creating a transaction category.
pub async fn create_category_endpoint(
    State(state): State<AppState>,
    Json(entry): Json<LookupEntry>,
) -> Result<(StatusCode, Json<LookupEntry>), Error> {
    create_lookup(LookupKind::Category, &state, &entry)
}

/// A route handler for updating a transaction category's description.
pub async fn update_category_endpoint(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(update): Json<LookupUpdate>,
) -> Result<Json<LookupEntry>, Error> {
    update_lookup(LookupKind::Category, &state, &name, &update)
}

/// A route handler for deleting a transaction category by name.
pub async fn delete_category_endpoint(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, Error> {
    delete_lookup(LookupKind::Category, &state, &name)
}

/// A route handler for listing all transaction types.
pub async fn list_types_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Vec<LookupEntry>>, Error> {
    list_entries(LookupKind::Type, &state)
}

/// A route handler for creating a transaction type.
pub async fn create_type_endpoint(
    State(state): State<AppState>,
    Json(entry): Json<LookupEntry>,
) -> Result<(StatusCode, Json<LookupEntry>), Error> {
    create_lookup(LookupKind::Type, &state, &entry)
}

/// A route handler for updating a transaction type's description.
pub async fn update_type_endpoint(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(update): Json<LookupUpdate>,
) -> Result<Json<LookupEntry>, Error> {
    update_lookup(LookupKind::Type, &state, &name, &update)
}

/// A route handler for deleting a transaction type by name.
pub async fn delete_type_endpoint(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, Error> {
    delete_lookup(LookupKind::Type, &state, &name)
}

/// A route handler for listing all transaction sources.
pub async fn list_sources_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Vec<LookupEntry>>, Error> {
    list_entries(LookupKind::Source, &state)
}

/// A route handler for creating a transaction source.
pub async fn create_source_endpoint(
    State(state): State<AppState>,
    Json(entry): Json<LookupEntry>,
) -> Result<(StatusCode, Json<LookupEntry>), Error> {
    create_lookup(LookupKind::Source, &state, &entry)
}

/// A route handler for updating a transaction source's description.
pub async fn update_source_endpoint(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(update): Json<LookupUpdate>,
) -> Result<Json<LookupEntry>, Error> {
    update_lookup(LookupKind::Source, &state, &name, &update)
}

/// A route handler for deleting a transaction source by name.
pub async fn delete_source_endpoint(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, Error> {
    delete_lookup(LookupKind::Source, &state, &name)
}
