use once_cell::sync::Lazy;
use regex::Regex;
use surrealdb::sql::Thing;

use crate::middleware::error::{AppError, AppResult};

static RECORD_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid record key regex"));

/// Builds `tb:id` from a URL path key. Keys containing a table part or other
/// punctuation are rejected so they never reach a query.
pub fn get_str_id_thing(tb: &str, id: &str) -> AppResult<Thing> {
    if !RECORD_KEY.is_match(id) {
        return Err(AppError::Validation {
            description: format!("invalid id '{id}'"),
        });
    }
    Ok(Thing::from((tb, id)))
}

pub const LEN_OR_NONE: fn(v: String) -> Option<String> = |v| {
    let trimmed = v.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
};
