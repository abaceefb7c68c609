//! The script repository: quota checks, the single-active-script rule, and
//! the transaction around every multi-step change.

use std::fs;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Transaction};
use tracing::{debug, info, warn};

use crate::config::RepositoryConfig;
use crate::error::{Error, Result};
use crate::quota;
use crate::store::{QuotaStore, ScriptStore, SqliteStore};
use crate::types::{
    NO_SCRIPT_NAME, QuotaKey, QuotaSize, Script, ScriptSummary, validate_owner,
    validate_script_name,
};

pub struct ScriptRepository {
    store: SqliteStore,
}

impl ScriptRepository {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    /// Opens (creating if needed) the database under `config.data_dir`.
    pub fn open(config: &RepositoryConfig) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;
        let store = SqliteStore::new(config.db_path(), config.busy_timeout())?;
        store.initialize()?;
        info!(path = %config.db_path().display(), "opened script repository");
        Ok(Self::new(store))
    }

    pub fn in_memory() -> Result<Self> {
        let store = SqliteStore::open_in_memory()?;
        store.initialize()?;
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    fn in_transaction<T, F>(&self, operation: &str, owner: &str, op: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        self.store.transaction(op).inspect_err(|e| {
            if e.is_storage() {
                warn!(operation, owner, error = %e, "transaction rolled back");
            } else {
                debug!(operation, owner, error = %e, "request refused");
            }
        })
    }

    // Scripts

    /// Fails with `QuotaExceeded` if `size` more bytes under `name` would not fit.
    /// An existing script called `name` does not count towards used space.
    pub fn have_space(&self, owner: &str, name: &str, size: u64) -> Result<()> {
        validate_owner(owner)?;
        self.in_transaction("have_space", owner, |tx| {
            check_space(tx, owner, name, size)
        })
    }

    /// Stores `content` under `name`, replacing any previous content.
    /// Replacing an active script keeps it active with its original activation date.
    pub fn put_script(&self, owner: &str, name: &str, content: &str) -> Result<()> {
        validate_owner(owner)?;
        validate_script_name(name)?;

        let mut script = Script::new(owner, name, content);
        self.in_transaction("put_script", owner, |tx| {
            check_space(tx, owner, name, script.size())?;
            if let Some(existing) = tx.find_script(owner, name)? {
                script.inherit_activation(&existing);
            }
            tx.upsert_script(&script)
        })?;

        info!(owner, script = name, size = script.size(), "stored script");
        Ok(())
    }

    pub fn list_scripts(&self, owner: &str) -> Result<Vec<ScriptSummary>> {
        validate_owner(owner)?;
        let scripts = self.in_transaction("list_scripts", owner, |tx| tx.find_all_scripts(owner))?;
        Ok(scripts.iter().map(Script::summary).collect())
    }

    pub fn get_script(&self, owner: &str, name: &str) -> Result<String> {
        validate_owner(owner)?;
        self.in_transaction("get_script", owner, |tx| {
            tx.find_script(owner, name)?
                .map(Script::into_content)
                .ok_or_else(|| script_not_found(owner, name))
        })
    }

    pub fn get_active(&self, owner: &str) -> Result<String> {
        Ok(self.find_active(owner)?.into_content())
    }

    pub fn get_activation_date(&self, owner: &str) -> Result<DateTime<Utc>> {
        let script = self.find_active(owner)?;
        script
            .activated_at()
            .ok_or_else(|| Error::ScriptNotFound(format!("no active script for {owner}")))
    }

    fn find_active(&self, owner: &str) -> Result<Script> {
        validate_owner(owner)?;
        self.in_transaction("get_active", owner, |tx| {
            tx.find_active_script(owner)?
                .ok_or_else(|| Error::ScriptNotFound(format!("no active script for {owner}")))
        })
    }

    /// Makes `name` the owner's only active script, or switches the active
    /// script off when `name` is `NO_SCRIPT_NAME`.
    pub fn set_active(&self, owner: &str, name: &str) -> Result<()> {
        validate_owner(owner)?;

        if name == NO_SCRIPT_NAME {
            let switched_off = self.in_transaction("set_active", owner, |tx| {
                let Some(mut active) = tx.find_active_script(owner)? else {
                    return Ok(None);
                };
                active.deactivate();
                tx.upsert_script(&active)?;
                Ok(Some(active.name().to_string()))
            })?;
            if let Some(previous) = switched_off {
                info!(owner, script = %previous, "deactivated script");
            }
            return Ok(());
        }

        self.in_transaction("set_active", owner, |tx| {
            let mut target = tx
                .find_script(owner, name)?
                .ok_or_else(|| script_not_found(owner, name))?;

            // Switch the old one off first so the pair never shows two actives.
            if let Some(mut current) = tx.find_active_script(owner)? {
                if current.name() != name {
                    current.deactivate();
                    tx.upsert_script(&current)?;
                }
            }

            target.activate(Utc::now());
            tx.upsert_script(&target)
        })?;

        info!(owner, script = name, "activated script");
        Ok(())
    }

    /// Removes an inactive script. The active script must be switched off first.
    pub fn delete_script(&self, owner: &str, name: &str) -> Result<()> {
        validate_owner(owner)?;
        self.in_transaction("delete_script", owner, |tx| {
            let script = tx
                .find_script(owner, name)?
                .ok_or_else(|| script_not_found(owner, name))?;
            if script.is_active() {
                return Err(Error::IsActive(format!("{name} is the active script of {owner}")));
            }
            tx.delete_script(owner, name)?;
            Ok(())
        })?;

        info!(owner, script = name, "deleted script");
        Ok(())
    }

    /// Moves a script to a new name. Never overwrites an existing script.
    pub fn rename_script(&self, owner: &str, old_name: &str, new_name: &str) -> Result<()> {
        validate_owner(owner)?;
        validate_script_name(new_name)?;

        self.in_transaction("rename_script", owner, |tx| {
            let script = tx
                .find_script(owner, old_name)?
                .ok_or_else(|| script_not_found(owner, old_name))?;
            if tx.find_script(owner, new_name)?.is_some() {
                return Err(Error::Duplicate(format!("{new_name} already exists for {owner}")));
            }
            tx.delete_script(owner, old_name)?;
            tx.upsert_script(&script.renamed(new_name))
        })?;

        info!(owner, from = old_name, to = new_name, "renamed script");
        Ok(())
    }

    // Quotas

    pub fn has_default_quota(&self) -> Result<bool> {
        self.has_quota_for(&QuotaKey::Default)
    }

    pub fn get_default_quota(&self) -> Result<QuotaSize> {
        self.get_quota_for(&QuotaKey::Default)
    }

    pub fn set_default_quota(&self, limit: QuotaSize) -> Result<()> {
        self.set_quota_for(&QuotaKey::Default, limit)
    }

    pub fn remove_default_quota(&self) -> Result<()> {
        self.remove_quota_for(&QuotaKey::Default)
    }

    pub fn has_quota(&self, owner: &str) -> Result<bool> {
        self.has_quota_for(&owner_key(owner)?)
    }

    pub fn get_quota(&self, owner: &str) -> Result<QuotaSize> {
        self.get_quota_for(&owner_key(owner)?)
    }

    pub fn set_quota(&self, owner: &str, limit: QuotaSize) -> Result<()> {
        self.set_quota_for(&owner_key(owner)?, limit)
    }

    pub fn remove_quota(&self, owner: &str) -> Result<()> {
        self.remove_quota_for(&owner_key(owner)?)
    }

    fn has_quota_for(&self, key: &QuotaKey) -> Result<bool> {
        self.in_transaction("has_quota", key.storage_key(), |tx| {
            Ok(tx.find_quota(key)?.is_some())
        })
    }

    fn get_quota_for(&self, key: &QuotaKey) -> Result<QuotaSize> {
        self.in_transaction("get_quota", key.storage_key(), |tx| {
            tx.find_quota(key)?
                .map(|entry| entry.limit)
                .ok_or_else(|| Error::QuotaNotFound(key.to_string()))
        })
    }

    fn set_quota_for(&self, key: &QuotaKey, limit: QuotaSize) -> Result<()> {
        self.in_transaction("set_quota", key.storage_key(), |tx| {
            tx.upsert_quota(key, limit)
        })?;
        info!(%key, %limit, "set quota");
        Ok(())
    }

    fn remove_quota_for(&self, key: &QuotaKey) -> Result<()> {
        let removed = self.in_transaction("remove_quota", key.storage_key(), |tx| {
            tx.remove_quota(key)
        })?;
        if removed {
            info!(%key, "removed quota");
        }
        Ok(())
    }
}

fn owner_key(owner: &str) -> Result<QuotaKey> {
    validate_owner(owner)?;
    Ok(QuotaKey::Owner(owner.to_string()))
}

fn script_not_found(owner: &str, name: &str) -> Error {
    Error::ScriptNotFound(format!("{name} for {owner}"))
}

/// Quota check on an open transaction. A missing quota entry means "fall
/// through to the next level", never an error.
fn check_space(conn: &Connection, owner: &str, name: &str, size: u64) -> Result<()> {
    let used = conn
        .find_all_scripts(owner)?
        .iter()
        .filter(|script| script.name() != name)
        .map(Script::size)
        .fold(0u64, u64::saturating_add);

    let limit = quota::effective_limit(
        conn.find_quota(&QuotaKey::Owner(owner.to_string()))?
            .map(|entry| entry.limit),
        conn.find_quota(&QuotaKey::Default)?.map(|entry| entry.limit),
    );

    if quota::admit(used, size, limit) {
        return Ok(());
    }

    Err(Error::QuotaExceeded {
        owner: owner.to_string(),
        used,
        requested: size,
        limit: limit.as_bytes().unwrap_or(u64::MAX),
    })
}
