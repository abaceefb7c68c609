pub const SCHEMA: &str = r#"
-- One row per (owner, script name)
CREATE TABLE IF NOT EXISTS sieve_scripts (
    owner TEXT NOT NULL,
    name TEXT NOT NULL,
    content TEXT NOT NULL,
    size INTEGER NOT NULL,
    active INTEGER NOT NULL DEFAULT 0,
    activated_at TEXT,           -- NULL unless active

    PRIMARY KEY (owner, name),
    CHECK ((active = 1) = (activated_at IS NOT NULL))
);

-- Quota limits; '' is the default entry
CREATE TABLE IF NOT EXISTS sieve_quotas (
    quota_key TEXT PRIMARY KEY,
    limit_bytes INTEGER          -- NULL = unlimited
);

-- At most one active script per owner
CREATE UNIQUE INDEX IF NOT EXISTS idx_sieve_scripts_one_active
    ON sieve_scripts(owner) WHERE active = 1;
"#;
