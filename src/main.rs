use std::io;

use anyhow::Context;
use clap::Parser;
use fs_simulator::cli::Cli;
use fs_simulator::logging::init_logging;
use fs_simulator::repl;
use fs_simulator::terminal::Terminal;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.logging_config()).context("failed to initialise logging")?;
    let config = cli.simulator_config().context("invalid configuration")?;
    info!(?config, "starting simulator");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.show_banner {
        repl::write_banner(&mut out)?;
    }

    let terminal = Terminal::new(&config);
    let released = repl::run(terminal, stdin.lock(), &mut out)?;
    info!(released, "simulator stopped");
    Ok(())
}
