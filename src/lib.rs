// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # noto-iconset
//!
//! Turns a checkout of the Noto Emoji SVG sources into a single Polymer
//! iconset document, and an emoji feed into a shortname → emoji dictionary.
//!
//! ## Architecture
//!
//! - **Decoding** (`codepoint`): hex codepoint sequences → text
//! - **Sanitizing** (`sanitize`): raw SVG → flattened inner markup
//! - **Collecting** (`collect`, `dictionary`): tolerant folds that keep the
//!   surviving items and the skipped ones apart
//! - **Rendering** (`render`): Handlebars templates → atomically written artifacts
//! - **Driver** (`pipeline`): the linear build, configured by `config`
//!
//! ## Library usage
//!
//! ```no_run
//! use noto_iconset::config::BuildConfig;
//! use noto_iconset::pipeline::run_build;
//!
//! let report = run_build(&BuildConfig::default()).unwrap();
//! println!("{} icons", report.iconset.parsed);
//! ```

pub mod acquire;
pub mod codepoint;
pub mod collect;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod sanitize;
