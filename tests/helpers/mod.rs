pub mod project_helpers;
pub mod test_with_server;
