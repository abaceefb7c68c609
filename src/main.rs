use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sievekeeper::cli::{
    QuotaCommands, ScriptCommands, init_repository, load_config, run_quota_get, run_quota_remove,
    run_quota_set, run_script_activate, run_script_active, run_script_check,
    run_script_deactivate, run_script_delete, run_script_get, run_script_list, run_script_put,
    run_script_rename,
};
use sievekeeper::repository::ScriptRepository;

#[derive(Parser)]
#[command(name = "sievekeeper")]
#[command(about = "Manage per-user mail filtering scripts and quotas", long_about = None)]
struct Cli {
    /// Data directory for the database
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and database
    Init,

    /// Manage scripts
    Script {
        #[command(subcommand)]
        command: ScriptCommands,
    },

    /// Manage quotas
    Quota {
        #[command(subcommand)]
        command: QuotaCommands,
    },
}

fn run_script(repo: &ScriptRepository, command: ScriptCommands) -> anyhow::Result<()> {
    match command {
        ScriptCommands::Put { owner, name, file } => {
            run_script_put(repo, &owner, &name, file.as_deref())
        }
        ScriptCommands::Get { owner, name } => run_script_get(repo, &owner, &name),
        ScriptCommands::List { owner, json } => run_script_list(repo, &owner, json),
        ScriptCommands::Active { owner, date } => run_script_active(repo, &owner, date),
        ScriptCommands::Activate { owner, name } => run_script_activate(repo, &owner, &name),
        ScriptCommands::Deactivate { owner } => run_script_deactivate(repo, &owner),
        ScriptCommands::Delete {
            owner,
            name,
            non_interactive,
            yes,
        } => run_script_delete(repo, &owner, &name, non_interactive, yes),
        ScriptCommands::Rename {
            owner,
            old_name,
            new_name,
        } => run_script_rename(repo, &owner, &old_name, &new_name),
        ScriptCommands::Check { owner, name, size } => run_script_check(repo, &owner, &name, size),
    }
}

fn run_quota(repo: &ScriptRepository, command: QuotaCommands) -> anyhow::Result<()> {
    match command {
        QuotaCommands::Get { owner } => run_quota_get(repo, owner.as_deref()),
        QuotaCommands::Set { limit, owner } => run_quota_set(repo, owner.as_deref(), limit),
        QuotaCommands::Remove {
            owner,
            non_interactive,
            yes,
        } => run_quota_remove(repo, owner.as_deref(), non_interactive, yes),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("sievekeeper=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Init => {
            ScriptRepository::open(&config)?;
            println!("Initialized database at {}", config.db_path().display());
        }
        Commands::Script { command } => {
            let repo = init_repository(&config)?;
            run_script(&repo, command)?;
        }
        Commands::Quota { command } => {
            let repo = init_repository(&config)?;
            run_quota(&repo, command)?;
        }
    }

    Ok(())
}
