use crate::error::{Error, Result};

const MAX_OWNER_LEN: usize = 255;
const MAX_SCRIPT_NAME_LEN: usize = 1024;
const INVALID_CHARS: &[char] = &['\0', '\n', '\r'];

fn validate(value: &str, entity: &str, max_len: usize) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidArgument(format!("{entity} cannot be empty")));
    }

    if value.len() > max_len {
        return Err(Error::InvalidArgument(format!(
            "{entity} cannot exceed {max_len} bytes"
        )));
    }

    if value.chars().any(|c| INVALID_CHARS.contains(&c)) {
        return Err(Error::InvalidArgument(format!(
            "{entity} contains invalid characters"
        )));
    }

    Ok(())
}

pub fn validate_owner(owner: &str) -> Result<()> {
    validate(owner, "Owner", MAX_OWNER_LEN)
}

/// Rejects the reserved `NO_SCRIPT_NAME` along with other unusable names.
pub fn validate_script_name(name: &str) -> Result<()> {
    validate(name, "Script name", MAX_SCRIPT_NAME_LEN)
}
