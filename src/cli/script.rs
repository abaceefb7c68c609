use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::repository::ScriptRepository;
use crate::types::{NO_SCRIPT_NAME, ScriptSummary};

use super::prompt::confirm_action;

#[derive(Serialize)]
struct ScriptListOutput<'a> {
    owner: &'a str,
    scripts: &'a [ScriptSummary],
}

fn read_content(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display())),
        None => Ok(io::read_to_string(io::stdin())?),
    }
}

pub fn run_script_put(
    repo: &ScriptRepository,
    owner: &str,
    name: &str,
    file: Option<&Path>,
) -> anyhow::Result<()> {
    let content = read_content(file)?;
    repo.put_script(owner, name, &content)?;
    println!("Stored script '{name}' for {owner} ({} bytes)", content.len());
    Ok(())
}

pub fn run_script_get(repo: &ScriptRepository, owner: &str, name: &str) -> anyhow::Result<()> {
    let content = repo.get_script(owner, name)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

pub fn run_script_list(repo: &ScriptRepository, owner: &str, json: bool) -> anyhow::Result<()> {
    let scripts = repo.list_scripts(owner)?;

    if json {
        let output = ScriptListOutput {
            owner,
            scripts: &scripts,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if scripts.is_empty() {
        println!("No scripts found.");
        return Ok(());
    }
    for script in &scripts {
        let marker = if script.active { "  (active)" } else { "" };
        println!("  {}{marker}", script.name);
    }
    Ok(())
}

pub fn run_script_active(repo: &ScriptRepository, owner: &str, date: bool) -> anyhow::Result<()> {
    if date {
        println!("{}", repo.get_activation_date(owner)?.to_rfc3339());
        return Ok(());
    }

    let content = repo.get_active(owner)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

pub fn run_script_activate(repo: &ScriptRepository, owner: &str, name: &str) -> anyhow::Result<()> {
    repo.set_active(owner, name)?;
    println!("Activated script '{name}' for {owner}");
    Ok(())
}

pub fn run_script_deactivate(repo: &ScriptRepository, owner: &str) -> anyhow::Result<()> {
    repo.set_active(owner, NO_SCRIPT_NAME)?;
    println!("No active script for {owner}");
    Ok(())
}

pub fn run_script_delete(
    repo: &ScriptRepository,
    owner: &str,
    name: &str,
    non_interactive: bool,
    yes: bool,
) -> anyhow::Result<()> {
    if !confirm_action(&format!("Delete script '{name}' of {owner}?"), yes, non_interactive)? {
        println!("Cancelled.");
        return Ok(());
    }

    repo.delete_script(owner, name)?;
    println!("Deleted script '{name}' for {owner}");
    Ok(())
}

pub fn run_script_rename(
    repo: &ScriptRepository,
    owner: &str,
    old_name: &str,
    new_name: &str,
) -> anyhow::Result<()> {
    repo.rename_script(owner, old_name, new_name)?;
    println!("Renamed script '{old_name}' to '{new_name}' for {owner}");
    Ok(())
}

pub fn run_script_check(
    repo: &ScriptRepository,
    owner: &str,
    name: &str,
    size: u64,
) -> anyhow::Result<()> {
    repo.have_space(owner, name, size)?;
    println!("{size} bytes fit for '{name}' of {owner}");
    Ok(())
}
