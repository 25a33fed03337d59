//! Core data types shared by the collectors and the renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// One icon of the iconset: the text its codepoints spell and its cleaned markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconRecord {
    /// Decoded character sequence, used as the icon id.
    pub text: String,
    /// Sanitized inner SVG content.
    pub markup: String,
}

/// A file from the icon directory, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Bare file name, e.g. `emoji_u1f600.svg`.
    pub name: String,
    /// Raw file content.
    pub content: String,
}

impl SourceEntry {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// One record of the emoji feed.
///
/// Missing codepoint data decodes as an empty sequence, which the dictionary
/// builder then skips like any other undecodable record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedRecord {
    #[serde(default)]
    pub code_points: FeedCodePoints,
    /// Dictionary key. When absent the record's feed key is used instead.
    #[serde(default)]
    pub shortname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeedCodePoints {
    /// Hyphen-separated hex groups, e.g. `1f468-200d-1f469`.
    #[serde(default)]
    pub base: String,
}

/// Decoded feed, keyed by the feed's own (opaque) keys in sorted order.
pub type Feed = BTreeMap<String, FeedRecord>;

/// Shortname → decoded text.
pub type Dictionary = BTreeMap<String, String>;

/// An item a collector skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Zero-based position of the item in the collector's input.
    pub index: usize,
    /// File name or feed key of the item.
    pub item: String,
    pub error: DecodeError,
}

/// Output of a tolerant collection pass: what survived and what was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected<T> {
    pub items: T,
    pub failures: Vec<ItemFailure>,
    /// Number of input items looked at.
    pub processed: usize,
}

impl<T> Collected<T> {
    /// Start a pass with an empty accumulator.
    pub fn starting_with(items: T) -> Self {
        Self {
            items,
            failures: Vec::new(),
            processed: 0,
        }
    }

    /// Number of items that made it into `items`.
    pub fn parsed(&self) -> usize {
        self.processed - self.failures.len()
    }

    /// Number of skipped items.
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }
}
