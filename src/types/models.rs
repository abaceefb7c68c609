use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Reserved script name passed to `set_active` to switch off the active script.
pub const NO_SCRIPT_NAME: &str = "";

/// A stored script. `size` is always the byte length of `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    owner: String,
    name: String,
    content: String,
    size: u64,
    active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    activated_at: Option<DateTime<Utc>>,
}

impl Script {
    /// Builds an inactive script, deriving its size from the content.
    pub fn new(owner: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            owner: owner.into(),
            name: name.into(),
            size: content.len() as u64,
            content,
            active: false,
            activated_at: None,
        }
    }

    pub(crate) fn from_parts(
        owner: String,
        name: String,
        content: String,
        size: u64,
        activated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            owner,
            name,
            content,
            size,
            active: activated_at.is_some(),
            activated_at,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activated_at(&self) -> Option<DateTime<Utc>> {
        self.activated_at
    }

    pub fn activate(&mut self, at: DateTime<Utc>) {
        self.active = true;
        self.activated_at = Some(at);
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.activated_at = None;
    }

    /// Carries the activation state of `previous` over to this script.
    pub fn inherit_activation(&mut self, previous: &Script) {
        self.active = previous.active;
        self.activated_at = previous.activated_at;
    }

    /// Same record under a new name; content, size and activation are unchanged.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn summary(&self) -> ScriptSummary {
        ScriptSummary {
            name: self.name.clone(),
            active: self.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSummary {
    pub name: String,
    pub active: bool,
}

/// A storage limit in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaSize {
    Unlimited,
    Size(u64),
}

impl QuotaSize {
    pub fn as_bytes(&self) -> Option<u64> {
        match self {
            QuotaSize::Unlimited => None,
            QuotaSize::Size(bytes) => Some(*bytes),
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, QuotaSize::Unlimited)
    }
}

impl From<Option<u64>> for QuotaSize {
    fn from(bytes: Option<u64>) -> Self {
        bytes.map_or(QuotaSize::Unlimited, QuotaSize::Size)
    }
}

impl fmt::Display for QuotaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaSize::Unlimited => f.write_str("unlimited"),
            QuotaSize::Size(bytes) => write!(f, "{bytes}"),
        }
    }
}

impl FromStr for QuotaSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unlimited") {
            return Ok(QuotaSize::Unlimited);
        }
        s.parse::<u64>()
            .map(QuotaSize::Size)
            .map_err(|_| Error::InvalidArgument(format!("'{s}' is not a byte count or 'unlimited'")))
    }
}

/// Identifies a quota entry: one owner's limit, or the limit applied to everyone else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuotaKey {
    Default,
    Owner(String),
}

impl QuotaKey {
    /// Key as persisted. Owners are never empty, so the default key cannot collide.
    pub(crate) fn storage_key(&self) -> &str {
        match self {
            QuotaKey::Default => "",
            QuotaKey::Owner(owner) => owner,
        }
    }
}

impl fmt::Display for QuotaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaKey::Default => f.write_str("default quota"),
            QuotaKey::Owner(owner) => write!(f, "quota for {owner}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaEntry {
    pub key: QuotaKey,
    pub limit: QuotaSize,
}
