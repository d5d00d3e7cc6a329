pub mod calc;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod gesture;
pub mod marker;
pub mod models;
pub mod readiness;
pub mod scheduler;
pub mod size;
pub mod store;
pub mod viewport;
