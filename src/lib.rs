pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod server;
pub mod session;
pub mod types;
