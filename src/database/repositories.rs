pub mod project_repo;
pub mod rating_repo;
