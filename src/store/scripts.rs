use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::sqlite::{format_datetime, parse_datetime};
use crate::error::{Error, Result};
use crate::types::Script;

/// Script record access. Runs on whatever transaction it is called through.
pub trait ScriptStore {
    fn find_all_scripts(&self, owner: &str) -> Result<Vec<Script>>;
    fn find_active_script(&self, owner: &str) -> Result<Option<Script>>;
    fn find_script(&self, owner: &str, name: &str) -> Result<Option<Script>>;
    fn upsert_script(&self, script: &Script) -> Result<()>;
    fn delete_script(&self, owner: &str, name: &str) -> Result<bool>;
}

const SCRIPT_COLUMNS: &str = "owner, name, content, size, activated_at";

fn script_from_row(row: &Row<'_>) -> rusqlite::Result<Script> {
    let size: i64 = row.get(3)?;
    let size = u64::try_from(size)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(e)))?;
    let activated_at = row
        .get::<_, Option<String>>(4)?
        .map(|s| parse_datetime(4, &s))
        .transpose()?;

    Ok(Script::from_parts(
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        size,
        activated_at,
    ))
}

impl ScriptStore for Connection {
    fn find_all_scripts(&self, owner: &str) -> Result<Vec<Script>> {
        let mut stmt = self.prepare(&format!(
            "SELECT {SCRIPT_COLUMNS} FROM sieve_scripts WHERE owner = ?1 ORDER BY name"
        ))?;

        let rows = stmt.query_map(params![owner], script_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn find_active_script(&self, owner: &str) -> Result<Option<Script>> {
        self.query_row(
            &format!("SELECT {SCRIPT_COLUMNS} FROM sieve_scripts WHERE owner = ?1 AND active = 1"),
            params![owner],
            script_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn find_script(&self, owner: &str, name: &str) -> Result<Option<Script>> {
        self.query_row(
            &format!("SELECT {SCRIPT_COLUMNS} FROM sieve_scripts WHERE owner = ?1 AND name = ?2"),
            params![owner, name],
            script_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn upsert_script(&self, script: &Script) -> Result<()> {
        let size = i64::try_from(script.size()).map_err(|_| {
            Error::InvalidArgument(format!("script {} is too large to store", script.name()))
        })?;

        self.execute(
            "INSERT INTO sieve_scripts (owner, name, content, size, active, activated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (owner, name) DO UPDATE SET
                content = excluded.content,
                size = excluded.size,
                active = excluded.active,
                activated_at = excluded.activated_at",
            params![
                script.owner(),
                script.name(),
                script.content(),
                size,
                script.is_active(),
                script.activated_at().as_ref().map(format_datetime),
            ],
        )?;
        Ok(())
    }

    fn delete_script(&self, owner: &str, name: &str) -> Result<bool> {
        let rows = self.execute(
            "DELETE FROM sieve_scripts WHERE owner = ?1 AND name = ?2",
            params![owner, name],
        )?;
        Ok(rows > 0)
    }
}
