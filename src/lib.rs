//! # Sievekeeper
//!
//! Per-user storage of mail-filtering scripts with quotas and a single
//! active script per user, usable both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! sievekeeper = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use sievekeeper::config::RepositoryConfig;
//! use sievekeeper::repository::ScriptRepository;
//! use sievekeeper::types::{QuotaSize, NO_SCRIPT_NAME};
//!
//! let repo = ScriptRepository::open(&RepositoryConfig::default()).unwrap();
//! repo.set_default_quota(QuotaSize::Size(64 * 1024)).unwrap();
//! repo.put_script("alice", "vacation", "require \"vacation\";").unwrap();
//! repo.set_active("alice", "vacation").unwrap();
//! repo.set_active("alice", NO_SCRIPT_NAME).unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod quota;
pub mod repository;
pub mod store;
pub mod types;
