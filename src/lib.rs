pub mod config;
pub mod database;
pub mod errors;
pub mod geo;
pub mod hierarchy;
pub mod server;
pub mod services;
