// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Command-Line Driver
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod output;

use cli::Cli;
use freddi_core::evolution::{DiskEvolution, Termination};
use freddi_types::config::DiskConfig;
use output::{snapshot_path, summary_path, write_snapshot_file, SummaryWriter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DiskConfig::from_file(&path.to_string_lossy())
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => DiskConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate().context("invalid configuration")?;

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let mut disk = DiskEvolution::new(&config).context("failed to set up the disk")?;

    let output = &config.output;
    let path = summary_path(&output.dir, &output.prefix);
    let invocation = std::env::args().collect::<Vec<_>>().join(" ");
    let mut summary = SummaryWriter::create(&path, &output.bands, disk.grid().r_out(), &invocation)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let result = disk.run(|record, disk| {
        summary.write_record(record)?;
        if output.fulldata {
            write_snapshot_file(&snapshot_path(&output.dir, &output.prefix, record.step), disk)?;
        }
        Ok(())
    });
    summary.flush()?;
    let run = result.context("disk evolution failed")?;

    match run.termination {
        Termination::Horizon => {
            tracing::info!("{} steps written to {}", run.steps, path.display());
        }
        Termination::SolverFailure { message } => {
            tracing::warn!(
                "stopped after {} steps, output kept in {}: {}",
                run.steps,
                path.display(),
                message
            );
        }
    }
    Ok(())
}
