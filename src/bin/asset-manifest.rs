use std::path::PathBuf;

use anyhow::Context as _;
use asset_manifest::{EmitMode, ManifestGenerator, ProjectConfig};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Regenerate the icon and logo lookup script used by the proposal builder UI.
#[derive(Parser, Debug)]
#[command(name = "asset-manifest", version, about)]
struct Cli {
    /// Project root; every configured path is relative to it.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Configuration file (defaults to `<root>/asset-manifest.json` when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Script to write, overriding the configured target.
    #[arg(long)]
    target: Option<PathBuf>,

    /// Regenerate the whole file or patch blocks in place.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Skip the inline data URI icon table.
    #[arg(long)]
    no_inline: bool,

    /// Log every skipped directory and duplicate name.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Full,
    Patch,
}

impl From<ModeChoice> for EmitMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Full => EmitMode::Full,
            ModeChoice::Patch => EmitMode::Patch,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let mut config = match &cli.config {
        Some(path) => ProjectConfig::from_path(path),
        None => ProjectConfig::discover(&cli.root),
    }
    .context("load configuration")?;

    if let Some(target) = cli.target {
        config.target = target;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if cli.no_inline {
        config.inline_icons = false;
    }

    let report = ManifestGenerator::new(&cli.root, &config)
        .generate()
        .with_context(|| format!("generate asset manifest under '{}'", cli.root.display()))?;

    println!("{report}");
    Ok(())
}
