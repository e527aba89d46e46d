pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod env_file;
pub mod error;
pub mod logging;
pub mod output;
pub mod roles;
