use tracing::debug;

use crate::config::DetectorConfig;
use crate::errors::{DupResult, ValidationError};

/// Checks caller input against the configured limits and cleans it for a batch.
///
/// The raw count is checked before anything else, then every entry is trimmed
/// and empty entries are dropped. Lengths are measured in characters on the
/// trimmed entry; `index` in errors is 1-based over the raw input.
pub fn prepare_sentences<S: AsRef<str>>(
    raw: &[S],
    config: &DetectorConfig,
) -> DupResult<Vec<String>> {
    if raw.len() < 2 {
        return Err(ValidationError::TooFewSentences(raw.len()).into());
    }
    if raw.len() > config.max_sentences {
        return Err(ValidationError::TooManySentences {
            max: config.max_sentences,
            actual: raw.len(),
        }
        .into());
    }

    let mut sentences = Vec::with_capacity(raw.len());
    for (idx, entry) in raw.iter().enumerate() {
        let trimmed = entry.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let length = trimmed.chars().count();
        if length > config.max_sentence_chars {
            return Err(ValidationError::SentenceTooLong {
                index: idx + 1,
                length,
                max: config.max_sentence_chars,
            }
            .into());
        }
        sentences.push(trimmed.to_string());
    }

    if sentences.len() < 2 {
        return Err(ValidationError::TooFewNonEmpty(sentences.len()).into());
    }

    debug!(
        "Prepared {} sentences ({} empty entries dropped)",
        sentences.len(),
        raw.len() - sentences.len()
    );
    Ok(sentences)
}
