use crate::repository::ScriptRepository;
use crate::types::QuotaSize;

use super::prompt::confirm_action;

fn describe(owner: Option<&str>) -> String {
    match owner {
        Some(owner) => format!("quota for {owner}"),
        None => "default quota".to_string(),
    }
}

pub fn run_quota_get(repo: &ScriptRepository, owner: Option<&str>) -> anyhow::Result<()> {
    let limit = match owner {
        Some(owner) => repo.get_quota(owner)?,
        None => repo.get_default_quota()?,
    };
    println!("{limit}");
    Ok(())
}

pub fn run_quota_set(
    repo: &ScriptRepository,
    owner: Option<&str>,
    limit: QuotaSize,
) -> anyhow::Result<()> {
    match owner {
        Some(owner) => repo.set_quota(owner, limit)?,
        None => repo.set_default_quota(limit)?,
    }
    println!("Set {} to {limit}", describe(owner));
    Ok(())
}

pub fn run_quota_remove(
    repo: &ScriptRepository,
    owner: Option<&str>,
    non_interactive: bool,
    yes: bool,
) -> anyhow::Result<()> {
    let what = describe(owner);
    if !confirm_action(&format!("Remove {what}?"), yes, non_interactive)? {
        println!("Cancelled.");
        return Ok(());
    }

    match owner {
        Some(owner) => repo.remove_quota(owner)?,
        None => repo.remove_default_quota()?,
    }
    println!("Removed {what}");
    Ok(())
}
