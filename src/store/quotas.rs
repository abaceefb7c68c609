use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{Error, Result};
use crate::types::{QuotaEntry, QuotaKey, QuotaSize};

/// Quota limit access. Runs on whatever transaction it is called through.
pub trait QuotaStore {
    fn find_quota(&self, key: &QuotaKey) -> Result<Option<QuotaEntry>>;
    fn upsert_quota(&self, key: &QuotaKey, limit: QuotaSize) -> Result<()>;
    fn remove_quota(&self, key: &QuotaKey) -> Result<bool>;
}

impl QuotaStore for Connection {
    fn find_quota(&self, key: &QuotaKey) -> Result<Option<QuotaEntry>> {
        let limit = self
            .query_row(
                "SELECT limit_bytes FROM sieve_quotas WHERE quota_key = ?1",
                params![key.storage_key()],
                |row| {
                    row.get::<_, Option<i64>>(0)?
                        .map(|bytes| {
                            u64::try_from(bytes).map_err(|e| {
                                rusqlite::Error::FromSqlConversionFailure(
                                    0,
                                    Type::Integer,
                                    Box::new(e),
                                )
                            })
                        })
                        .transpose()
                },
            )
            .optional()?;

        Ok(limit.map(|bytes| QuotaEntry {
            key: key.clone(),
            limit: QuotaSize::from(bytes),
        }))
    }

    fn upsert_quota(&self, key: &QuotaKey, limit: QuotaSize) -> Result<()> {
        let bytes = limit
            .as_bytes()
            .map(i64::try_from)
            .transpose()
            .map_err(|_| Error::InvalidArgument(format!("{limit} bytes is out of range")))?;

        self.execute(
            "INSERT INTO sieve_quotas (quota_key, limit_bytes) VALUES (?1, ?2)
             ON CONFLICT (quota_key) DO UPDATE SET limit_bytes = excluded.limit_bytes",
            params![key.storage_key(), bytes],
        )?;
        Ok(())
    }

    fn remove_quota(&self, key: &QuotaKey) -> Result<bool> {
        let rows = self.execute(
            "DELETE FROM sieve_quotas WHERE quota_key = ?1",
            params![key.storage_key()],
        )?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;

    fn store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store
    }

    #[test]
    fn test_quota_crud() {
        let store = store();
        let conn = store.connection();
        let key = QuotaKey::Owner("alice".into());

        assert!(conn.find_quota(&key).unwrap().is_none());

        conn.upsert_quota(&key, QuotaSize::Size(100)).unwrap();
        conn.upsert_quota(&key, QuotaSize::Size(200)).unwrap();
        let entry = conn.find_quota(&key).unwrap().unwrap();
        assert_eq!(entry.limit, QuotaSize::Size(200));

        assert!(conn.remove_quota(&key).unwrap());
        assert!(!conn.remove_quota(&key).unwrap());
        assert!(conn.find_quota(&key).unwrap().is_none());
    }

    #[test]
    fn test_unlimited_is_stored_as_entry() {
        let store = store();
        let conn = store.connection();

        conn.upsert_quota(&QuotaKey::Default, QuotaSize::Unlimited).unwrap();
        let entry = conn.find_quota(&QuotaKey::Default).unwrap().unwrap();
        assert_eq!(entry.limit, QuotaSize::Unlimited);
    }

    #[test]
    fn test_default_and_owner_keys_are_separate() {
        let store = store();
        let conn = store.connection();

        conn.upsert_quota(&QuotaKey::Default, QuotaSize::Size(10)).unwrap();
        assert!(
            conn.find_quota(&QuotaKey::Owner("default.quota".into()))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_out_of_range_limit_rejected() {
        let store = store();
        let conn = store.connection();

        let result = conn.upsert_quota(&QuotaKey::Default, QuotaSize::Size(u64::MAX));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
