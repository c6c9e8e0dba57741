pub mod file;
pub mod format_utils;
pub mod validate_utils;
