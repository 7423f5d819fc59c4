//! CLI commands module.

mod config;
mod run;

pub use config::ConfigCommand;
pub use run::RunCommand;
