pub mod config;
pub mod errors;
pub mod models;
pub mod probes;
pub mod registry;
pub mod services;
