//! noto-iconset CLI: build the emoji iconset and shortname dictionary.

use std::path::PathBuf;

use clap::Parser;
use miette::{IntoDiagnostic, Result};

use noto_iconset::config::{BuildConfig, FeedLocation};
use noto_iconset::pipeline::{BuildReport, DictionaryReport, run_build};

#[derive(Parser)]
#[command(
    name = "noto-iconset",
    version,
    about = "Build a Polymer emoji iconset and shortname dictionary"
)]
struct Cli {
    /// TOML build configuration. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Checkout of the Noto Emoji repository.
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Directory holding the templates.
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Directory the artifacts are written to.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Emoji feed, as an http(s) URL or a local path.
    #[arg(long)]
    feed: Option<String>,

    /// Re-clone the Noto Emoji repository before building.
    #[arg(long)]
    refresh_source: bool,

    /// Rebuild the dictionary even if it already exists.
    #[arg(long)]
    refresh_dictionary: bool,

    /// Run the external analysis over the iconset afterwards.
    #[arg(long)]
    run_analysis: bool,
}

impl Cli {
    fn into_config(self) -> Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::load(path)?,
            None => BuildConfig::default(),
        };

        if let Some(dir) = self.source_dir {
            config.source.root = dir;
        }
        if let Some(dir) = self.template_dir {
            config.template_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(feed) = self.feed {
            config.feed = FeedLocation::parse(&feed);
        }
        config.refresh_source |= self.refresh_source;
        config.refresh_dictionary |= self.refresh_dictionary;
        config.run_analysis |= self.run_analysis;
        Ok(config)
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config()?;
    let report = run_build(&config)?;
    print_report(&report).into_diagnostic()?;
    Ok(())
}

fn print_report(report: &BuildReport) -> std::io::Result<()> {
    use std::io::Write;

    let mut out = std::io::stdout().lock();
    if report.source_cloned {
        writeln!(out, "Cloned icon sources")?;
    }

    let iconset = &report.iconset;
    writeln!(
        out,
        "Iconset: {} icons, {} skipped -> {}",
        iconset.parsed,
        iconset.failures.len(),
        iconset.path.display()
    )?;
    for failure in &iconset.failures {
        writeln!(out, "  skipped {}: {}", failure.item, failure.error)?;
    }

    match &report.dictionary {
        DictionaryReport::Built {
            entries,
            failures,
            path,
        } => {
            writeln!(
                out,
                "Dictionary: {entries} entries, {} skipped -> {}",
                failures.len(),
                path.display()
            )?;
            for failure in failures {
                writeln!(out, "  skipped {}: {}", failure.item, failure.error)?;
            }
        }
        DictionaryReport::Skipped { path } => {
            writeln!(
                out,
                "Dictionary: {} exists, use --refresh-dictionary to rebuild",
                path.display()
            )?;
        }
    }

    if let Some(path) = &report.analysis {
        writeln!(out, "Analysis: {}", path.display())?;
    }
    Ok(())
}
