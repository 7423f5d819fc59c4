//! Run command.

use clap::Args;
use giztoy_prodcon::{Orchestrator, RandomSource, TracingReporter};
use tracing::info;

use crate::Cli;
use crate::config::{Overrides, resolve_config};

/// Run the producer and consumer.
///
/// Without --items the run continues until Ctrl-C. With --items the producer
/// stops after that many items and the run ends once the consumer has
/// drained the buffer.
#[derive(Args)]
pub struct RunCommand {
    #[command(flatten)]
    overrides: Overrides,
}

impl RunCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = resolve_config(cli.config.as_deref(), &self.overrides)?;
        if cfg.seed.is_none() {
            info!("no seed configured, seeding from entropy");
        }

        let orchestrator = Orchestrator::new(cfg)?;
        let source = RandomSource::new(orchestrator.config().seed);
        let running = orchestrator.start(source, TracingReporter)?;
        let stopper = running.stop_handle();

        let mut join = tokio::task::spawn_blocking(move || running.join());
        tokio::select! {
            result = &mut join => {
                result??;
                return Ok(());
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("interrupt received, stopping");
                stopper.stop();
            }
        }

        join.await??;
        Ok(())
    }
}
