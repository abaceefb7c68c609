mod models;
mod name;

pub use models::*;
pub use name::{validate_owner, validate_script_name};
