//! Shortname dictionary: emoji feed → `shortname → text`.
//!
//! The feed is a JSON object mapping opaque keys to records carrying a
//! hyphen-separated codepoint sequence and a shortname. Records whose sequence
//! does not decode are skipped the same way the icon collector skips files.

use crate::codepoint::{FEED_SEPARATOR, decode_sequence};
use crate::error::{RenderError, RenderResult, SourceError, SourceResult};
use crate::model::{Collected, Dictionary, Feed, ItemFailure};

/// Decode raw feed bytes.
pub fn parse_feed(bytes: &[u8]) -> SourceResult<Feed> {
    serde_json::from_slice(bytes).map_err(|e| SourceError::MalformedFeed {
        message: e.to_string(),
    })
}

/// Build the dictionary from a decoded feed.
///
/// Records are visited in feed-key order. A record without a shortname is
/// filed under its feed key. When two records share a shortname the later
/// one wins.
pub fn build_dictionary(feed: &Feed) -> Collected<Dictionary> {
    let total = feed.len();
    tracing::info!(total, "parsing emoji feed");

    let collected = feed.iter().enumerate().fold(
        Collected::starting_with(Dictionary::new()),
        |mut acc, (index, (key, record))| {
            acc.processed += 1;
            match decode_sequence(&record.code_points.base, FEED_SEPARATOR) {
                Ok(text) => {
                    let shortname = record.shortname.as_deref().unwrap_or(key);
                    if let Some(previous) = acc.items.insert(shortname.to_string(), text) {
                        tracing::debug!(shortname, %previous, "shortname redefined");
                    }
                }
                Err(error) => {
                    tracing::warn!(position = index + 1, total, key = %key, %error, "skipping emoji");
                    acc.failures.push(ItemFailure {
                        index,
                        item: key.clone(),
                        error,
                    });
                }
            }
            acc
        },
    );

    tracing::info!(
        entries = collected.items.len(),
        skipped = collected.skipped(),
        "emoji feed parsed"
    );
    collected
}

/// Serialize the dictionary as a compact JSON object with sorted keys.
pub fn encode_dictionary(dictionary: &Dictionary) -> RenderResult<String> {
    serde_json::to_string(dictionary).map_err(|e| RenderError::Serialize {
        what: "emoji dictionary".into(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn feed_key_is_fallback_shortname() {
        let feed = parse_feed(br#"{"grinning face": {"code_points": {"base": "1f600"}}}"#).unwrap();
        let collected = build_dictionary(&feed);
        assert_eq!(collected.items.len(), 1);
        assert_eq!(collected.items["grinning face"], "\u{1F600}");
    }

    #[test]
    fn shortname_field_wins_over_key() {
        let feed = parse_feed(
            br#"{
                "1f600": {"code_points": {"base": "1f600", "output": "1f600"}, "shortname": ":grinning:", "category": "people"},
                "0031-20e3": {"code_points": {"base": "0031-20e3"}, "shortname": ":one:"}
            }"#,
        )
        .unwrap();
        let dictionary = build_dictionary(&feed).items;
        assert_eq!(dictionary[":grinning:"], "\u{1F600}");
        assert_eq!(dictionary[":one:"], "1\u{20E3}");
        assert!(!dictionary.contains_key("1f600"));
    }

    #[test]
    fn bad_records_are_skipped_not_fatal() {
        let feed = parse_feed(
            br#"{
                "a": {"code_points": {"base": "1f44d"}, "shortname": ":thumbsup:"},
                "b": {"code_points": {"base": "1f44d_1f3fb"}, "shortname": ":thumbsup_tone1:"},
                "c": {"code_points": {"base": "2764"}, "shortname": ":heart:"}
            }"#,
        )
        .unwrap();
        let collected = build_dictionary(&feed);
        assert_eq!(collected.processed, 3);
        assert_eq!(collected.items.len(), 2);
        assert_eq!(collected.skipped(), 1);
        assert_eq!(collected.failures[0].index, 1);
        assert_eq!(collected.failures[0].item, "b");
        assert!(matches!(collected.failures[0].error, DecodeError::InvalidHex { .. }));
    }

    #[test]
    fn duplicate_shortname_later_key_wins() {
        let feed = parse_feed(
            br#"{
                "x2": {"code_points": {"base": "1f600"}, "shortname": ":smile:"},
                "x1": {"code_points": {"base": "1f604"}, "shortname": ":smile:"}
            }"#,
        )
        .unwrap();
        assert_eq!(build_dictionary(&feed).items[":smile:"], "\u{1F600}");
    }

    #[test]
    fn malformed_feed_is_fatal() {
        assert!(matches!(
            parse_feed(b"[1, 2, 3]"),
            Err(SourceError::MalformedFeed { .. })
        ));
        assert!(matches!(
            parse_feed(br#"{"a": {"code_points": {"base": 42}}}"#),
            Err(SourceError::MalformedFeed { .. })
        ));
    }

    #[test]
    fn records_without_codepoints_are_skipped() {
        let feed = parse_feed(
            br#"{
                "a": {"code_points": {"base": "1f600"}, "shortname": ":grinning:"},
                "b": {"shortname": ":no_codepoints:"},
                "c": {"code_points": {}, "shortname": ":no_base:"}
            }"#,
        )
        .unwrap();
        let collected = build_dictionary(&feed);
        assert_eq!(collected.processed, 3);
        assert_eq!(collected.items.len(), 1);
        assert_eq!(collected.items[":grinning:"], "\u{1F600}");

        let skipped: Vec<(usize, &str)> = collected
            .failures
            .iter()
            .map(|f| (f.index, f.item.as_str()))
            .collect();
        assert_eq!(skipped, vec![(1, "b"), (2, "c")]);
        assert!(
            collected
                .failures
                .iter()
                .all(|f| matches!(f.error, DecodeError::InvalidHex { ref group, .. } if group.is_empty()))
        );
    }

    #[test]
    fn encoding_is_sorted_and_carries_characters() {
        let mut dictionary = Dictionary::new();
        dictionary.insert(":b:".into(), "\u{1F171}".into());
        dictionary.insert(":a:".into(), "\u{1F170}".into());
        assert_eq!(
            encode_dictionary(&dictionary).unwrap(),
            "{\":a:\":\"\u{1F170}\",\":b:\":\"\u{1F171}\"}"
        );
    }
}
