//! Fuzzy matching of a phrase against the enabled command table.

use std::collections::HashSet;

use crate::command::types::{normalize, CommandEntry};

/// Minimum word-overlap score for an [`MatchKind::Overlap`] hit.
pub const OVERLAP_THRESHOLD: f64 = 0.5;

/// How a candidate matched the phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Normalized trigger equals the normalized phrase.
    Exact,
    /// Trigger is a substring of the phrase, or the phrase of the trigger.
    Contains,
    /// Word-overlap (Jaccard) score at or above [`OVERLAP_THRESHOLD`].
    Overlap,
}

/// A command-table hit: the matched entry plus score and kind.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    pub entry: CommandEntry,
    /// In [0, 1]; 1.0 for exact and containment hits.
    pub score: f64,
    pub kind: MatchKind,
}

/// Find the best match for `phrase` among `candidates`.
///
/// Three passes in strict priority order, each scanning candidates in
/// slice order: exact equality short-circuits on the first hit, then
/// containment, then Jaccard word-overlap scoring where the maximum wins
/// and ties keep the earlier candidate. Slice order is the only ordering
/// this function depends on, so results are deterministic for a given
/// input sequence.
///
/// Callers pass only enabled entries; triggers are non-empty by the store
/// invariant. An empty phrase never matches (an empty needle is a
/// substring of every trigger, so the containment pass must not see it).
pub fn best_match(phrase: &str, candidates: &[CommandEntry]) -> Option<MatchCandidate> {
    let phrase = normalize(phrase);
    if phrase.is_empty() {
        return None;
    }

    for entry in candidates {
        if entry.trigger_phrase == phrase {
            return Some(MatchCandidate {
                entry: entry.clone(),
                score: 1.0,
                kind: MatchKind::Exact,
            });
        }
    }

    for entry in candidates {
        if phrase.contains(&entry.trigger_phrase) || entry.trigger_phrase.contains(&phrase) {
            return Some(MatchCandidate {
                entry: entry.clone(),
                score: 1.0,
                kind: MatchKind::Contains,
            });
        }
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, entry) in candidates.iter().enumerate() {
        let score = word_overlap(&entry.trigger_phrase, &phrase);
        // Strict comparison keeps the earlier candidate on ties.
        if best.map(|(_, s)| score > s).unwrap_or(score > 0.0) {
            best = Some((index, score));
        }
    }

    best.filter(|(_, score)| *score >= OVERLAP_THRESHOLD)
        .map(|(index, score)| MatchCandidate {
            entry: candidates[index].clone(),
            score,
            kind: MatchKind::Overlap,
        })
}

/// Jaccard similarity over whitespace-delimited word sets. An empty union
/// yields 0.
fn word_overlap(a: &str, b: &str) -> f64 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}
