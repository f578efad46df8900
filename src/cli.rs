use std::path::PathBuf;

mod terminal;

use ssmreport::Converter;
use terminal::Colorize;
use tracing::instrument;

/// Converts a SISTEMA project file into a plain-text report.
///
/// The report is written next to the project file with a `.txt` extension.
/// Set `RUST_LOG` (for example `RUST_LOG=debug`) for diagnostic output.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// The SISTEMA project file (.ssm) to convert
    source: PathBuf,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging();
        self.convert()
    }

    #[instrument(skip(self))]
    fn convert(self) -> anyhow::Result<()> {
        let output = Converter::new(self.source)?.convert()?;
        println!("{}", format!("Wrote {}", output.display()).success());
        Ok(())
    }

    fn setup_logging() {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
