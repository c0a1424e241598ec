//! Database operations for the name-keyed lookup tables.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Selects one of the three lookup tables referenced by transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// The `category` table, referenced by `category_level1`/`category_level2`.
    Category,
    /// The `type` table, referenced by a transaction's type.
    Type,
    /// The `source` table, referenced by a transaction's source.
    Source,
}

impl LookupKind {
    /// The quoted SQL table name.
    fn table(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Type => "\"type\"",
            Self::Source => "source",
        }
    }

    /// The human-readable name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Type => "type",
            Self::Source => "source",
        }
    }
}

/// A row in one of the lookup tables.
///
/// Rows are keyed by `name`; transactions reference them by that name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    /// The unique name of the entry.
    pub name: String,
    /// An optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Create a lookup entry.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyLookupName] if the name is empty or only whitespace,
/// - [Error::DuplicateLookup] if an entry with the same name already exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_entry(
    kind: LookupKind,
    entry: &LookupEntry,
    connection: &Connection,
) -> Result<LookupEntry, Error> {
    let name = entry.name.trim();
    if name.is_empty() {
        return Err(Error::EmptyLookupName(kind.label()));
    }

    connection
        .execute(
            &format!(
                "INSERT INTO {} (name, description) VALUES (?1, ?2)",
                kind.table()
            ),
            (name, &entry.description),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(sql_error, _)
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Error::DuplicateLookup(kind.label(), name.to_string())
            }
            error => error.into(),
        })?;

    Ok(LookupEntry {
        name: name.to_string(),
        description: entry.description.clone(),
    })
}

/// Create a lookup entry if it does not exist yet.
///
/// Used by the batch transaction upload to auto-create referenced lookup
/// rows. Existing entries are left untouched. Empty names are skipped
/// because the corresponding transaction column is NULL anyway.
pub fn ensure_entry(kind: LookupKind, name: &str, connection: &Connection) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Ok(());
    }

    connection.execute(
        &format!(
            "INSERT OR IGNORE INTO {} (name, description) VALUES (?1, NULL)",
            kind.table()
        ),
        [name],
    )?;

    Ok(())
}

/// Retrieve all entries of a lookup table ordered alphabetically by name.
pub fn get_all_entries(kind: LookupKind, connection: &Connection) -> Result<Vec<LookupEntry>, Error> {
    connection
        .prepare(&format!(
            "SELECT name, description FROM {} ORDER BY name ASC",
            kind.table()
        ))?
        .query_map([], map_entry_row)?
        .map(|entry_result| entry_result.map_err(|error| error.into()))
        .collect()
}

/// Update a lookup entry's description. The name is the key and cannot be
/// changed.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingLookup] if no entry with `name` exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_entry(
    kind: LookupKind,
    name: &str,
    description: Option<&str>,
    connection: &Connection,
) -> Result<LookupEntry, Error> {
    let rows_affected = connection.execute(
        &format!("UPDATE {} SET description = ?1 WHERE name = ?2", kind.table()),
        (description, name),
    )?;

    if rows_affected == 0 {
        return Err(Error::MissingLookup(kind.label(), name.to_string()));
    }

    Ok(LookupEntry {
        name: name.to_string(),
        description: description.map(|text| text.to_string()),
    })
}

/// Delete a lookup entry by name.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingLookup] if no entry with `name` exists,
/// - [Error::ForeignKeyConstraint] if the entry is still referenced by a
///   transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_entry(kind: LookupKind, name: &str, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        &format!("DELETE FROM {} WHERE name = ?1", kind.table()),
        [name],
    )?;

    if rows_affected == 0 {
        return Err(Error::MissingLookup(kind.label(), name.to_string()));
    }

    Ok(())
}

/// Create the three lookup tables in the database.
///
/// # Errors
/// Returns an error if the tables cannot be created or if there is an SQL error.
pub fn create_lookup_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            name TEXT PRIMARY KEY NOT NULL,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS \"type\" (
            name TEXT PRIMARY KEY NOT NULL,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS source (
            name TEXT PRIMARY KEY NOT NULL,
            description TEXT
        );",
    )?;

    Ok(())
}

fn map_entry_row(row: &Row) -> Result<LookupEntry, rusqlite::Error> {
    Ok(LookupEntry {
        name: row.get(0)?,
        description: row.get(1)?,
    })
}

#[cfg(test)]
mod lookup_db_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        transaction::{NewTransaction, create_transaction},
    };

    use super::{
        LookupEntry, LookupKind, create_entry, delete_entry, ensure_entry, get_all_entries,
        update_entry,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn entry(name: &str) -> LookupEntry {
        LookupEntry {
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn create_and_list_entries() {
        let connection = get_test_connection();

        create_entry(LookupKind::Category, &entry("Rent"), &connection).unwrap();
        create_entry(LookupKind::Category, &entry("Food"), &connection).unwrap();

        let entries = get_all_entries(LookupKind::Category, &connection).unwrap();
        let names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Rent"]);
    }

    #[test]
    fn kinds_are_stored_in_separate_tables() {
        let connection = get_test_connection();

        create_entry(LookupKind::Category, &entry("Food"), &connection).unwrap();

        assert!(get_all_entries(LookupKind::Type, &connection).unwrap().is_empty());
        assert!(get_all_entries(LookupKind::Source, &connection).unwrap().is_empty());
    }

    #[test]
    fn create_fails_on_empty_name() {
        let connection = get_test_connection();

        let result = create_entry(LookupKind::Type, &entry("  \t"), &connection);

        assert_eq!(result, Err(Error::EmptyLookupName("type")));
    }

    #[test]
    fn create_fails_on_duplicate_name() {
        let connection = get_test_connection();
        create_entry(LookupKind::Source, &entry("Checking"), &connection).unwrap();

        let result = create_entry(LookupKind::Source, &entry("Checking"), &connection);

        assert_eq!(
            result,
            Err(Error::DuplicateLookup("source", "Checking".to_string()))
        );
    }

    #[test]
    fn ensure_entry_is_idempotent() {
        let connection = get_test_connection();

        ensure_entry(LookupKind::Category, "Food", &connection).unwrap();
        ensure_entry(LookupKind::Category, "Food", &connection).unwrap();

        let entries = get_all_entries(LookupKind::Category, &connection).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn ensure_entry_keeps_existing_description() {
        let connection = get_test_connection();
        create_entry(
            LookupKind::Category,
            &LookupEntry {
                name: "Food".to_string(),
                description: Some("groceries and dining".to_string()),
            },
            &connection,
        )
        .unwrap();

        ensure_entry(LookupKind::Category, "Food", &connection).unwrap();

        let entries = get_all_entries(LookupKind::Category, &connection).unwrap();
        assert_eq!(
            entries[0].description,
            Some("groceries and dining".to_string())
        );
    }

    #[test]
    fn update_overwrites_description() {
        let connection = get_test_connection();
        create_entry(LookupKind::Category, &entry("Food"), &connection).unwrap();

        let updated =
            update_entry(LookupKind::Category, "Food", Some("everyday meals"), &connection)
                .unwrap();

        assert_eq!(updated.description, Some("everyday meals".to_string()));

        let entries = get_all_entries(LookupKind::Category, &connection).unwrap();
        assert_eq!(entries[0].description, Some("everyday meals".to_string()));
    }

    #[test]
    fn update_missing_entry_fails() {
        let connection = get_test_connection();

        let result = update_entry(LookupKind::Category, "Nope", None, &connection);

        assert_eq!(
            result,
            Err(Error::MissingLookup("category", "Nope".to_string()))
        );
    }

    #[test]
    fn delete_removes_entry() {
        let connection = get_test_connection();
        create_entry(LookupKind::Category, &entry("Food"), &connection).unwrap();

        delete_entry(LookupKind::Category, "Food", &connection).unwrap();

        assert!(get_all_entries(LookupKind::Category, &connection).unwrap().is_empty());
    }

    #[test]
    fn delete_missing_entry_fails() {
        let connection = get_test_connection();

        let result = delete_entry(LookupKind::Category, "Nope", &connection);

        assert_eq!(
            result,
            Err(Error::MissingLookup("category", "Nope".to_string()))
        );
    }

    #[test]
    fn delete_referenced_entry_fails_with_constraint_violation() {
        let connection = get_test_connection();
        create_entry(LookupKind::Category, &entry("Food"), &connection).unwrap();
        create_transaction(
            &NewTransaction {
                date: time::macros::date!(2024 - 03 - 15),
                description: "Weekly shop".to_string(),
                notes: None,
                category_level1: None,
                category_level2: Some("Food".to_string()),
                type_name: None,
                amount: 1.0,
                source: None,
            },
            &connection,
        )
        .unwrap();

        let result = delete_entry(LookupKind::Category, "Food", &connection);

        assert_eq!(result, Err(Error::ForeignKeyConstraint));
    }
}
