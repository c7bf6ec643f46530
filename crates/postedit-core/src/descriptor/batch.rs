//! Per-file transform states submitted alongside a multi-media upload.
//!
//! The upload carries one JSON array with an entry for every file, in the
//! files' original order. A payload that cannot be lined up with the files
//! is dropped as a whole.

use serde_json::Value;

use super::TransformDescriptor;

/// Parse a JSON array of descriptors aligned with `expected_len` files.
///
/// Returns exactly `expected_len` entries. Object entries are decoded with
/// [`TransformDescriptor::from_raw`]; any other entry is `None`. Unparsable
/// text, a non-array, or a length mismatch yields all `None`.
pub fn parse_transform_states(text: &str, expected_len: usize) -> Vec<Option<TransformDescriptor>> {
    let entries = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(entries)) if entries.len() == expected_len => entries,
        Ok(Value::Array(entries)) => {
            log::warn!(
                "Ignoring transform states: {} entries for {} files",
                entries.len(),
                expected_len
            );
            return vec![None; expected_len];
        }
        Ok(_) => {
            log::warn!("Ignoring transform states: payload is not an array");
            return vec![None; expected_len];
        }
        Err(e) => {
            log::warn!("Ignoring malformed transform states: {}", e);
            return vec![None; expected_len];
        }
    };

    entries
        .iter()
        .map(|entry| entry.is_object().then(|| TransformDescriptor::from_raw(entry)))
        .collect()
}
