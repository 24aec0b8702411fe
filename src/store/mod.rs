//! Persistence layer: libSQL-backed storage for onboarding profiles.

pub mod libsql_backend;
pub mod migrations;
pub mod traits;

pub use libsql_backend::{LibSqlBackend, StoredProfile};
pub use traits::ProfileStore;
