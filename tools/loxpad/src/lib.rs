pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod interactive;
pub mod output;
pub mod telemetry;
