pub mod project;
pub mod rating;
