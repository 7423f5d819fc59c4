//! Config command.

use clap::Args;

use crate::Cli;
use crate::config::{Overrides, resolve_config};

/// Print the configuration a run would use, after applying overrides.
#[derive(Args)]
pub struct ConfigCommand {
    #[command(flatten)]
    overrides: Overrides,

    /// Output as JSON instead of YAML
    #[arg(long)]
    json: bool,
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = resolve_config(cli.config.as_deref(), &self.overrides)?;

        let output = if self.json {
            serde_json::to_string_pretty(&cfg)?
        } else {
            serde_yaml::to_string(&cfg)?
        };
        println!("{}", output);
        Ok(())
    }
}
