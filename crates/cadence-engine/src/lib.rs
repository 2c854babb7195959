pub mod cli;
pub mod config;
pub mod executor;
pub mod formatter;
pub mod session;
