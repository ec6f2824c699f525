pub mod log;
pub mod prelude;
pub mod project;
pub mod saved_schema;
pub mod user;
