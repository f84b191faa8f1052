//! Fuzzy title matching
//!
//! Titles on the two sides of a resolution rarely agree byte for byte: the
//! destination platform appends edition notes, credits and punctuation. Both
//! the identity fields and every candidate title are run through
//! [`normalize`] and compared by substring containment.

use crate::collector::CandidateItem;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

#[allow(clippy::expect_used)]
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("valid regex"));

/// Canonical form used for every comparison
///
/// Lower-cases, drops parenthetical groups, drops everything that is neither
/// alphanumeric nor whitespace, removes `feat`/`ft` credit tokens and
/// collapses whitespace. Idempotent.
pub fn normalize(s: &str) -> String {
    let lowered = s.to_lowercase();
    let without_groups = PARENTHETICAL.replace_all(&lowered, " ");
    let stripped: String = without_groups
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped
        .split_whitespace()
        .filter(|word| *word != "feat" && *word != "ft")
        .collect::<Vec<_>>()
        .join(" ")
}

/// First candidate, in collection order, whose normalized title contains the
/// normalized target
///
/// Result ordering from the host is taken as the relevance ranking, so no
/// secondary scoring happens: "Album" picks whichever of "Album" and
/// "Album (Live)" was listed first. An empty target matches nothing.
pub fn match_best<'a>(target: &str, candidates: &'a [CandidateItem]) -> Option<&'a CandidateItem> {
    let target = normalize(target);
    if target.is_empty() {
        return None;
    }

    let found = candidates
        .iter()
        .find(|candidate| normalize(&candidate.title).contains(&target));

    match found {
        Some(candidate) => debug!("Matched {:?} -> {}", target, candidate.url),
        None => debug!("No candidate among {} contains {:?}", candidates.len(), target),
    }
    found
}
