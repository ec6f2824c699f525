pub mod auth;
pub mod error;
pub mod handler;
pub mod request;
pub mod response;
pub mod wrapper;

pub use handler::router;
