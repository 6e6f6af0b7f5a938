pub mod connection;
pub mod models;
pub mod service;

pub use connection::connect;
pub use models::*;
