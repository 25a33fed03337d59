//! Build driver: the linear run from sources to artifacts.
//!
//! 1. Clone the icon sources if they are missing or a refresh was asked for.
//! 2. Read and collect the icons, render the iconset.
//! 3. If the dictionary is missing or a refresh was asked for: load and parse
//!    the feed, build and encode the dictionary, render it.
//! 4. Optionally run the external analysis over the iconset.
//!
//! Item-level decode failures are counted in the report. Every other error
//! ends the run and is returned to the caller. A refreshed artifact is only
//! replaced once its successor is fully rendered, so a failed rebuild keeps
//! the previous one.

use std::path::PathBuf;

use crate::acquire::{clone_source, is_stale, load_feed, needs_rebuild, run_analysis};
use crate::collect::load_icons;
use crate::config::BuildConfig;
use crate::dictionary::{build_dictionary, encode_dictionary, parse_feed};
use crate::error::IconsetResult;
use crate::model::ItemFailure;
use crate::render::ArtifactRenderer;

/// Outcome of the iconset stage.
#[derive(Debug, Clone)]
pub struct IconsetReport {
    pub parsed: usize,
    pub failures: Vec<ItemFailure>,
    pub path: PathBuf,
}

/// Outcome of the dictionary stage.
#[derive(Debug, Clone)]
pub enum DictionaryReport {
    Built {
        entries: usize,
        failures: Vec<ItemFailure>,
        path: PathBuf,
    },
    /// An artifact already existed and no refresh was requested.
    Skipped { path: PathBuf },
}

/// Summary of a build run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Whether the icon sources were cloned during this run.
    pub source_cloned: bool,
    pub iconset: IconsetReport,
    pub dictionary: DictionaryReport,
    /// Analysis output, when the analysis step ran.
    pub analysis: Option<PathBuf>,
}

/// Run the whole build described by `config`.
pub fn run_build(config: &BuildConfig) -> IconsetResult<BuildReport> {
    let renderer = ArtifactRenderer::new(&config.template_dir, &config.output_dir);

    let source_cloned = needs_rebuild(&config.source.root, config.refresh_source)?;
    if source_cloned {
        clone_source(&config.repository, &config.source.root)?;
    }

    let iconset = build_iconset(config, &renderer)?;
    let dictionary = if is_stale(&config.dictionary_path(), config.refresh_dictionary) {
        build_dictionary_artifact(config, &renderer)?
    } else {
        tracing::info!(path = %config.dictionary_path().display(), "dictionary up to date, skipping");
        DictionaryReport::Skipped {
            path: config.dictionary_path(),
        }
    };

    let analysis = if config.run_analysis {
        Some(run_analysis(
            &config.analysis,
            &config.output_dir,
            &config.iconset_template,
        )?)
    } else {
        None
    };

    Ok(BuildReport {
        source_cloned,
        iconset,
        dictionary,
        analysis,
    })
}

/// Collect icons and render the iconset.
pub fn build_iconset(
    config: &BuildConfig,
    renderer: &ArtifactRenderer,
) -> IconsetResult<IconsetReport> {
    let collected = load_icons(&config.source)?;
    tracing::info!(icons = collected.items.len(), "writing iconset");
    let path = renderer.render(&config.iconset_template, &collected.items)?;

    Ok(IconsetReport {
        parsed: collected.parsed(),
        failures: collected.failures,
        path,
    })
}

/// Load the feed, build the dictionary and render it.
pub fn build_dictionary_artifact(
    config: &BuildConfig,
    renderer: &ArtifactRenderer,
) -> IconsetResult<DictionaryReport> {
    let bytes = load_feed(&config.feed)?;
    let feed = parse_feed(&bytes)?;
    let collected = build_dictionary(&feed);
    let encoded = encode_dictionary(&collected.items)?;

    tracing::info!(entries = collected.items.len(), "writing emoji dictionary");
    let path = renderer.render(&config.dictionary_template, &encoded)?;

    Ok(DictionaryReport::Built {
        entries: collected.items.len(),
        failures: collected.failures,
        path,
    })
}
