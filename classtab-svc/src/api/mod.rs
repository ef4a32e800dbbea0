//! HTTP API handlers

pub mod health;
pub mod process;

pub use health::health_routes;
pub use process::process_routes;
