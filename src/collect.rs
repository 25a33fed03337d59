//! Icon collection: directory listing → ordered [`IconRecord`]s.
//!
//! Reading the directory is all-or-nothing: a missing directory or an
//! unreadable file aborts. Decoding is tolerant: an entry whose name does not
//! decode is logged, recorded as an [`ItemFailure`], and skipped, and the
//! surviving records keep the order of the listing.

use crate::codepoint::{FILE_SEPARATOR, decode_sequence, sequence_from_name};
use crate::config::SourceLayout;
use crate::error::{DecodeResult, SourceError, SourceResult};
use crate::model::{Collected, IconRecord, ItemFailure, SourceEntry};
use crate::sanitize::sanitize_markup;

/// List the icon directory and read every regular file in it.
///
/// Entries are sorted by file name so repeated runs see the same order.
/// Content is decoded as UTF-8, replacing invalid sequences.
pub fn read_source_dir(layout: &SourceLayout) -> SourceResult<Vec<SourceEntry>> {
    let dir = layout.icon_path();
    let list_error = |e| SourceError::ListDir {
        path: dir.display().to_string(),
        source: e,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(list_error)? {
        let entry = entry.map_err(list_error)?;
        let path = entry.path();
        if path.is_file() {
            paths.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    paths.sort_by(|a, b| a.0.cmp(&b.0));

    paths
        .into_iter()
        .map(|(name, path)| {
            let bytes = std::fs::read(&path).map_err(|e| SourceError::Read {
                path: path.display().to_string(),
                source: e,
            })?;
            Ok(SourceEntry::new(name, String::from_utf8_lossy(&bytes)))
        })
        .collect()
}

/// Turn a listing into icon records, skipping entries whose names do not decode.
pub fn collect_icons(entries: &[SourceEntry], layout: &SourceLayout) -> Collected<Vec<IconRecord>> {
    let total = entries.len();
    tracing::info!(total, "parsing icon sources");

    let collected = entries.iter().enumerate().fold(
        Collected::starting_with(Vec::with_capacity(total)),
        |mut acc, (index, entry)| {
            acc.processed += 1;
            match icon_from_entry(entry, layout) {
                Ok(icon) => {
                    tracing::debug!(position = index + 1, total, file = %entry.name, "parsed icon");
                    acc.items.push(icon);
                }
                Err(error) => {
                    tracing::warn!(
                        position = index + 1,
                        total,
                        file = %entry.name,
                        %error,
                        "skipping icon"
                    );
                    acc.failures.push(ItemFailure {
                        index,
                        item: entry.name.clone(),
                        error,
                    });
                }
            }
            acc
        },
    );

    tracing::info!(
        parsed = collected.parsed(),
        skipped = collected.skipped(),
        "icon sources parsed"
    );
    collected
}

/// Read and collect in one step.
pub fn load_icons(layout: &SourceLayout) -> SourceResult<Collected<Vec<IconRecord>>> {
    let entries = read_source_dir(layout)?;
    Ok(collect_icons(&entries, layout))
}

fn icon_from_entry(entry: &SourceEntry, layout: &SourceLayout) -> DecodeResult<IconRecord> {
    let sequence = sequence_from_name(&entry.name, &layout.prefix, &layout.extension)?;
    let text = decode_sequence(sequence, FILE_SEPARATOR)?;
    Ok(IconRecord {
        text,
        markup: sanitize_markup(&entry.content),
    })
}
