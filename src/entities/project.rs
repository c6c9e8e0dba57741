pub mod project_entity;
pub mod project_status;
pub mod rating_entity;
