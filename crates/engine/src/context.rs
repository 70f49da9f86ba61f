//! Context window assembly.
//!
//! Serializes the filtered record set to its tabular rendering and
//! hard-truncates it to a character budget. The budget approximates
//! the model's input-token limit at ~4 characters per token, so a
//! 12 000-character context is roughly 3 000 tokens. The cut is not
//! row- or word-boundary aware; precision of the cut point is not a
//! requirement.

use aquadata_core::record::RecordSet;
use tracing::debug;

/// Default character budget (~3 000 tokens at ~4 chars/token).
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 12_000;

/// Render `records` as text, truncated to at most `max_chars`
/// characters (Unicode scalar values, not bytes). Never errors; an
/// empty record set yields an empty string.
pub fn build_context(records: &RecordSet, max_chars: usize) -> String {
    let full = records.to_table_string();

    // nth(max_chars) is the first character past the budget; cutting at
    // its byte offset keeps exactly max_chars characters and can never
    // split a code point.
    match full.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            debug!(
                full_chars = full.chars().count(),
                max_chars, "context truncated"
            );
            full[..cut].to_string()
        }
        None => full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquadata_core::record::Record;

    fn record_set(rows: usize) -> RecordSet {
        let records = (0..rows)
            .map(|i| {
                Record::new(vec![
                    "Jalisco".into(),
                    format!("Cuerpo de agua número {i}"),
                    format!("{}.{}", 6 + i % 3, i % 10),
                ])
            })
            .collect();
        RecordSet::new(
            vec!["ESTADO".into(), "CUERPO".into(), "PH".into()],
            0,
            records,
        )
    }

    #[test]
    fn result_never_exceeds_budget() {
        let records = record_set(100);
        for max_chars in [1, 10, 100, 1_000, 100_000] {
            assert!(build_context(&records, max_chars).chars().count() <= max_chars);
        }
    }

    #[test]
    fn under_budget_is_identity() {
        let records = record_set(3);
        let full = records.to_table_string();
        assert!(full.chars().count() < DEFAULT_MAX_CONTEXT_CHARS);
        assert_eq!(build_context(&records, DEFAULT_MAX_CONTEXT_CHARS), full);
    }

    #[test]
    fn empty_record_set_is_empty_string() {
        let empty = record_set(0);
        assert_eq!(build_context(&empty, 1), "");
        assert_eq!(build_context(&empty, DEFAULT_MAX_CONTEXT_CHARS), "");
    }

    #[test]
    fn oversized_rendering_cut_to_exact_prefix() {
        // Enough rows that the rendering exceeds 50 000 characters
        let records = record_set(1_500);
        let full = records.to_table_string();
        assert!(full.chars().count() > 50_000);

        let context = build_context(&records, DEFAULT_MAX_CONTEXT_CHARS);
        assert_eq!(context.chars().count(), DEFAULT_MAX_CONTEXT_CHARS);
        let prefix: String = full.chars().take(DEFAULT_MAX_CONTEXT_CHARS).collect();
        assert_eq!(context, prefix);
    }

    #[test]
    fn truncation_respects_utf8_boundaries() {
        // "número" puts a multi-byte 'ú' in every row; cut at every
        // budget up to a full row without panicking
        let records = record_set(1);
        let full = records.to_table_string();
        for max_chars in 0..full.chars().count() {
            let context = build_context(&records, max_chars);
            assert_eq!(context.chars().count(), max_chars);
        }
    }
}
