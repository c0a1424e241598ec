//! The name-keyed lookup tables (category, type, source) referenced by
//! transactions, and their CRUD endpoints.

mod db;
mod endpoints;

pub use db::{
    LookupEntry, LookupKind, create_entry, create_lookup_tables, delete_entry, ensure_entry,
    get_all_entries, update_entry,
};
pub use endpoints::{
    LookupUpdate, create_category_endpoint, create_source_endpoint, create_type_endpoint,
    delete_category_endpoint, delete_source_endpoint, delete_type_endpoint,
    list_categories_endpoint, list_sources_endpoint, list_types_endpoint,
    update_category_endpoint, update_source_endpoint, update_type_endpoint,
};
