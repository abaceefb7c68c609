//! Quota arithmetic. Nothing here touches storage.

use crate::types::QuotaSize;

/// Resolves the limit enforced for an owner: their own entry, else the default, else unlimited.
pub fn effective_limit(owner: Option<QuotaSize>, default: Option<QuotaSize>) -> QuotaSize {
    owner.or(default).unwrap_or(QuotaSize::Unlimited)
}

/// Whether `candidate` more bytes fit next to `used` under `limit`.
///
/// `used` must not include the script being replaced.
pub fn admit(used: u64, candidate: u64, limit: QuotaSize) -> bool {
    match limit {
        QuotaSize::Unlimited => true,
        QuotaSize::Size(limit) => used.saturating_add(candidate) <= limit,
    }
}
