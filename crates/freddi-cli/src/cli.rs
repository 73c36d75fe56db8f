// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Command-Line Arguments
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "freddi")]
#[command(author, version, about = "Evolve a viscous accretion disk in an X-ray binary")]
pub struct Cli {
    /// JSON configuration; built-in defaults otherwise
    #[arg(short, long, env = "FREDDI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for output files; must exist
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Prefix of output filenames; the summary is PREFIX.dat
    #[arg(long)]
    pub prefix: Option<String>,

    /// Also write the radial structure of every step to PREFIX_<step>.dat
    #[arg(long)]
    pub fulldata: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut freddi_types::config::DiskConfig) {
        if let Some(dir) = &self.dir {
            config.output.dir = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.output.prefix = prefix.clone();
        }
        if self.fulldata {
            config.output.fulldata = true;
        }
    }
}
