mod commands;
mod prompt;
mod quota;
mod script;

use std::path::Path;

pub use commands::{QuotaCommands, ScriptCommands};
pub use quota::{run_quota_get, run_quota_remove, run_quota_set};
pub use script::{
    run_script_activate, run_script_active, run_script_check, run_script_deactivate,
    run_script_delete, run_script_get, run_script_list, run_script_put, run_script_rename,
};

use crate::config::RepositoryConfig;
use crate::repository::ScriptRepository;

/// Builds the configuration from an optional file, then applies `--data-dir`.
pub fn load_config(
    config_file: Option<&Path>,
    data_dir: Option<&str>,
) -> anyhow::Result<RepositoryConfig> {
    let mut config = match config_file {
        Some(path) => RepositoryConfig::load(path)?,
        None => RepositoryConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir.into();
    }
    Ok(config)
}

/// Open the repository, checking the database was initialized
pub fn init_repository(config: &RepositoryConfig) -> anyhow::Result<ScriptRepository> {
    let db_path = config.db_path();

    if !db_path.exists() {
        anyhow::bail!(
            "Database not found at {}. Run 'sievekeeper init' first.",
            db_path.display()
        );
    }

    ScriptRepository::open(config).map_err(Into::into)
}
