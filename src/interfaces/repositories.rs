pub mod project_ifce;
pub mod rating_ifce;
