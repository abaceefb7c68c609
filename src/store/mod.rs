//! Record-store adapters. `ScriptStore` and `QuotaStore` are implemented for
//! `rusqlite::Connection`, so they are callable on a `rusqlite::Transaction`
//! and take part in whatever transaction the caller opened.

mod quotas;
mod schema;
mod scripts;
mod sqlite;

pub use quotas::QuotaStore;
pub use scripts::ScriptStore;
pub use sqlite::SqliteStore;
