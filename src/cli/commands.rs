use std::path::PathBuf;

use clap::Subcommand;

use crate::types::QuotaSize;

#[derive(Subcommand)]
pub enum ScriptCommands {
    /// Store a script, replacing any script with the same name
    Put {
        /// Owner of the script
        owner: String,

        /// Script name
        name: String,

        /// Read the content from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Print a script's content
    Get {
        /// Owner of the script
        owner: String,

        /// Script name
        name: String,
    },

    /// List an owner's scripts
    List {
        /// Owner whose scripts to list
        owner: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the active script
    Active {
        /// Owner of the script
        owner: String,

        /// Print the activation date instead of the content
        #[arg(long)]
        date: bool,
    },

    /// Make a script the active one
    Activate {
        /// Owner of the script
        owner: String,

        /// Script name
        name: String,
    },

    /// Switch off the active script
    Deactivate {
        /// Owner of the script
        owner: String,
    },

    /// Delete an inactive script
    Delete {
        /// Owner of the script
        owner: String,

        /// Script name
        name: String,

        /// Skip interactive prompts (requires --yes)
        #[arg(long)]
        non_interactive: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Rename a script
    Rename {
        /// Owner of the script
        owner: String,

        /// Current name
        old_name: String,

        /// New name
        new_name: String,
    },

    /// Check whether a script of the given size would fit in the quota
    Check {
        /// Owner of the script
        owner: String,

        /// Script name (an existing script with this name is not counted)
        name: String,

        /// Size in bytes
        size: u64,
    },
}

#[derive(Subcommand)]
pub enum QuotaCommands {
    /// Print a quota
    Get {
        /// Owner whose quota to print (default quota when omitted)
        #[arg(long)]
        owner: Option<String>,
    },

    /// Set a quota
    Set {
        /// Limit in bytes, or "unlimited"
        limit: QuotaSize,

        /// Owner whose quota to set (default quota when omitted)
        #[arg(long)]
        owner: Option<String>,
    },

    /// Remove a quota
    Remove {
        /// Owner whose quota to remove (default quota when omitted)
        #[arg(long)]
        owner: Option<String>,

        /// Skip interactive prompts (requires --yes)
        #[arg(long)]
        non_interactive: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
