pub mod cmd;
pub mod config;
pub mod error;
