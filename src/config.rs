//! Build configuration.
//!
//! Every path and naming convention the build depends on lives here and is
//! handed to the stages explicitly. A config can be loaded from TOML; keys
//! that are left out keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Where the Noto icon sources live and how their files are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceLayout {
    /// Checkout of the upstream repository.
    pub root: PathBuf,
    /// Subdirectory of `root` holding one SVG per emoji.
    pub icon_dir: String,
    /// File name prefix before the codepoint sequence.
    pub prefix: String,
    /// File name suffix after the codepoint sequence.
    pub extension: String,
}

impl SourceLayout {
    /// Layout rooted at `root` with the Noto naming conventions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// `root/icon_dir/`
    pub fn icon_path(&self) -> PathBuf {
        self.root.join(&self.icon_dir)
    }
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("noto-emoji"),
            icon_dir: "svg".into(),
            prefix: "emoji_u".into(),
            extension: ".svg".into(),
        }
    }
}

/// Where the emoji feed comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedLocation {
    /// Fetched over HTTP(S).
    Url(String),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl FeedLocation {
    /// Treat `http://` and `https://` locations as URLs, anything else as a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl From<String> for FeedLocation {
    fn from(location: String) -> Self {
        Self::parse(&location)
    }
}

impl From<FeedLocation> for String {
    fn from(location: FeedLocation) -> Self {
        location.to_string()
    }
}

impl std::fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// External static analysis run over the rendered iconset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Program to spawn.
    pub program: String,
    /// Leading arguments; the iconset's file name is appended.
    pub args: Vec<String>,
    /// File (inside the output directory) that receives the program's stdout.
    pub output: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            program: "polymer".into(),
            args: vec!["analyze".into()],
            output: "analysis.json".into(),
        }
    }
}

/// Everything a build run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    pub source: SourceLayout,
    /// Upstream repository cloned into `source.root`.
    pub repository: String,
    pub feed: FeedLocation,
    /// Directory holding the Handlebars templates.
    pub template_dir: PathBuf,
    /// Directory artifacts are written to.
    pub output_dir: PathBuf,
    /// Template (and artifact) name of the iconset.
    pub iconset_template: String,
    /// Template (and artifact) name of the dictionary.
    pub dictionary_template: String,
    pub analysis: AnalysisConfig,
    /// Re-clone the sources even when a checkout exists.
    pub refresh_source: bool,
    /// Rebuild the dictionary even when the artifact exists.
    pub refresh_dictionary: bool,
    /// Run the analysis step after rendering.
    pub run_analysis: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: SourceLayout::default(),
            repository: "https://github.com/googlei18n/noto-emoji".into(),
            feed: FeedLocation::Url(
                "https://raw.githubusercontent.com/Ranks/emojione/master/emoji.json".into(),
            ),
            template_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("."),
            iconset_template: "noto-emoji-iconset.html".into(),
            dictionary_template: "emoji-dictionary.html".into(),
            analysis: AnalysisConfig::default(),
            refresh_source: false,
            refresh_dictionary: false,
            run_analysis: false,
        }
    }
}

impl BuildConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// `output_dir/iconset_template`
    pub fn iconset_path(&self) -> PathBuf {
        self.output_dir.join(&self.iconset_template)
    }

    /// `output_dir/dictionary_template`
    pub fn dictionary_path(&self) -> PathBuf {
        self.output_dir.join(&self.dictionary_template)
    }
}
