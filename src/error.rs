//! Rich diagnostic error types for the iconset builder.
//!
//! Each stage of the build defines its own error type with miette `#[diagnostic]`
//! derives. Only [`DecodeError`] is recoverable: collectors catch it per item and
//! keep going. Everything else aborts the build and reaches the user through
//! [`IconsetError`].

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for a build run: everything that can stop it.
///
/// Each variant wraps a stage-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum IconsetError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Acquire(#[from] AcquireError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Decode errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DecodeError {
    #[error("invalid hexadecimal group \"{group}\" in codepoint sequence \"{sequence}\"")]
    #[diagnostic(
        code(iconset::decode::invalid_hex),
        help(
            "Each group of a codepoint sequence must be a non-empty run of hex digits, \
             joined by the separator (e.g. \"1f600\" or \"0031_fe0f\")."
        )
    )]
    InvalidHex { sequence: String, group: String },

    #[error("codepoint {value:#x} in sequence \"{sequence}\" is not a Unicode scalar value")]
    #[diagnostic(
        code(iconset::decode::invalid_scalar),
        help("Surrogates (d800-dfff) and values above 10ffff cannot be turned into characters.")
    )]
    InvalidScalar { sequence: String, value: u32 },

    #[error("file name \"{name}\" does not match {prefix}<codepoints>{extension}")]
    #[diagnostic(
        code(iconset::decode::unexpected_name),
        help("Only files named like `emoji_u1f600.svg` are turned into icons.")
    )]
    UnexpectedName {
        name: String,
        prefix: String,
        extension: String,
    },
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

// ---------------------------------------------------------------------------
// Source errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("cannot list icon directory {path}")]
    #[diagnostic(
        code(iconset::source::list_dir),
        help(
            "The icon sources were not found. Run with --refresh-source to clone them, \
             or point --source-dir at an existing checkout."
        )
    )]
    ListDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {path}")]
    #[diagnostic(
        code(iconset::source::read),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed emoji feed: {message}")]
    #[diagnostic(
        code(iconset::source::malformed_feed),
        help(
            "The feed must be a JSON object mapping keys to records shaped like \
             {{\"code_points\": {{\"base\": \"1f600\"}}, \"shortname\": \":grinning:\"}}."
        )
    )]
    MalformedFeed { message: String },
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;

// ---------------------------------------------------------------------------
// Render errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    #[error("template not found: {path}")]
    #[diagnostic(
        code(iconset::render::template_missing),
        help("Templates are looked up by name in the template directory (--template-dir).")
    )]
    TemplateMissing {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("template \"{name}\" failed to compile: {message}")]
    #[diagnostic(
        code(iconset::render::template_syntax),
        help("Fix the Handlebars syntax in the template file.")
    )]
    TemplateSyntax { name: String, message: String },

    #[error("template \"{name}\" failed to render: {message}")]
    #[diagnostic(
        code(iconset::render::execute),
        help(
            "Templates render in strict mode: every field they reference must exist \
             in the data handed to them."
        )
    )]
    Execute { name: String, message: String },

    #[error("cannot write artifact {path}")]
    #[diagnostic(
        code(iconset::render::write),
        help("Check that the output directory exists and is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize {what}: {message}")]
    #[diagnostic(code(iconset::render::serialize))]
    Serialize { what: String, message: String },
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

// ---------------------------------------------------------------------------
// Acquisition errors (collaborators around the core)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum AcquireError {
    #[error("cloning {repository} into {path} failed: {message}")]
    #[diagnostic(
        code(iconset::acquire::clone),
        help("Make sure `git` is installed and the repository URL is reachable.")
    )]
    Clone {
        repository: String,
        path: String,
        message: String,
    },

    #[error("cannot remove stale {path}")]
    #[diagnostic(
        code(iconset::acquire::remove),
        help("A refresh deletes the previous copy first. Check permissions on the path.")
    )]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("fetch error for URL \"{url}\": {message}")]
    #[diagnostic(
        code(iconset::acquire::fetch),
        help("Check that the URL is reachable and the network is available.")
    )]
    Fetch { url: String, message: String },

    #[error("analysis with `{program}` failed: {message}")]
    #[diagnostic(
        code(iconset::acquire::analysis),
        help("Install the analysis tool (e.g. `npm install -g polymer-cli`) or drop --run-analysis.")
    )]
    Analysis { program: String, message: String },
}

pub type AcquireResult<T> = std::result::Result<T, AcquireError>;

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot read config file {path}")]
    #[diagnostic(code(iconset::config::read), help("Check the path passed to --config."))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {message}")]
    #[diagnostic(
        code(iconset::config::parse),
        help("The config file is TOML; unknown keys are rejected.")
    )]
    Parse { path: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Convenience alias for build results.
pub type IconsetResult<T> = std::result::Result<T, IconsetError>;
