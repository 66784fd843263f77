//! District Resolver — maps a free-text district query onto a stored district.
//!
//! Users type district names inconsistently (abbreviations, punctuation,
//! possessives, dropped words). Exact lookup misses too often and plain
//! substring search over-matches, so candidates are ranked by a token-aware
//! fuzzy distance with a length floor and a positional window.
//!
//! Distance scale: 0.0 is a perfect match, 1.0 is unrelated.

use strsim::normalized_damerau_levenshtein;
use thiserror::Error;
use tracing::debug;

use crate::matching::normalize::normalize;
use crate::models::district::District;
use crate::store::{DistrictStore, StoreError};

/// Similarity credited when a query token abbreviates a candidate token ("educ" / "education").
const PREFIX_SIMILARITY: f64 = 0.9;
/// Below this a token pair counts as unmatched. Roughly two edits on a five-letter word.
const MIN_TOKEN_SIMILARITY: f64 = 0.6;
/// Weight of the positional penalty relative to the edit distance.
const PROXIMITY_WEIGHT: f64 = 0.1;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("district query cannot be empty")]
    EmptyQuery,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Tuning knobs for the fuzzy scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyOptions {
    /// Maximum distance a candidate may have and still qualify.
    pub threshold: f64,
    /// Normalized queries shorter than this never match.
    pub min_match_char_length: usize,
    /// How far (in characters) a candidate token may sit from the query
    /// token's position and still count as a match.
    pub distance: usize,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            min_match_char_length: 3,
            distance: 100,
        }
    }
}

/// A candidate that cleared the threshold, with its distance.
#[derive(Debug, Clone)]
pub struct ScoredDistrict {
    pub district: District,
    pub score: f64,
    /// Canonical name equals the normalized query.
    pub exact: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DistrictResolver {
    options: FuzzyOptions,
}

impl DistrictResolver {
    pub fn new(options: FuzzyOptions) -> Self {
        Self { options }
    }

    /// Fetches candidates from the store and returns the best match, if any.
    ///
    /// A blank query is a caller error; "no qualifying candidate" is `Ok(None)`.
    pub async fn resolve(
        &self,
        store: &dyn DistrictStore,
        query: &str,
        state: Option<&str>,
    ) -> Result<Option<District>, ResolveError> {
        if query.trim().is_empty() {
            return Err(ResolveError::EmptyQuery);
        }

        let candidates = store.find_districts_by_state(state).await?;
        let best = self.best_match(query, candidates);

        match &best {
            Some(d) => debug!(query, district = %d.name, "Resolved district"),
            None => debug!(query, "No district cleared the match threshold"),
        }

        Ok(best)
    }

    /// Picks the single best candidate. Ties keep candidate order.
    pub fn best_match(&self, query: &str, candidates: Vec<District>) -> Option<District> {
        self.rank(query, candidates)
            .into_iter()
            .next()
            .map(|scored| scored.district)
    }

    /// Scores every candidate and returns those within the threshold, best first.
    pub fn rank(&self, query: &str, candidates: Vec<District>) -> Vec<ScoredDistrict> {
        let needle = normalize(query);
        if needle.chars().count() < self.options.min_match_char_length {
            return Vec::new();
        }

        let mut scored: Vec<ScoredDistrict> = candidates
            .into_iter()
            .filter_map(|district| {
                let canonical = normalize(&district.name);
                let raw = district.name.trim().to_lowercase();
                let exact = canonical == needle;
                let score = self
                    .distance(&needle, &canonical)
                    .min(self.distance(&needle, &raw));
                (score <= self.options.threshold).then_some(ScoredDistrict {
                    district,
                    score,
                    exact,
                })
            })
            .collect();

        // Exact canonical matches lead; otherwise stable, so equal scores keep
        // store order and the first result wins.
        scored.sort_by(|a, b| {
            b.exact.cmp(&a.exact).then_with(|| {
                a.score
                    .partial_cmp(&b.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        scored
    }

    /// Token-aware distance between a normalized query and one candidate text.
    ///
    /// Each query token takes its best similarity among the candidate tokens
    /// that start within `distance` characters of the query token's own
    /// offset; the per-token distances are averaged. A query token with no
    /// candidate token above `MIN_TOKEN_SIMILARITY` contributes the full 1.0.
    fn distance(&self, needle: &str, candidate: &str) -> f64 {
        if needle == candidate {
            return 0.0;
        }

        let query_tokens = tokens_with_offsets(needle);
        let candidate_tokens = tokens_with_offsets(candidate);
        if query_tokens.is_empty() || candidate_tokens.is_empty() {
            return 1.0;
        }

        let window = self.options.distance;
        let total: f64 = query_tokens
            .iter()
            .map(|(q_pos, q_tok)| {
                candidate_tokens
                    .iter()
                    .filter_map(|(c_pos, c_tok)| {
                        let offset = q_pos.abs_diff(*c_pos);
                        if offset > window {
                            return None;
                        }
                        let proximity = if window == 0 {
                            0.0
                        } else {
                            offset as f64 / window as f64
                        };
                        let similarity = token_similarity(q_tok, c_tok);
                        if similarity < MIN_TOKEN_SIMILARITY {
                            return None;
                        }
                        Some((1.0 - similarity) + PROXIMITY_WEIGHT * proximity)
                    })
                    .fold(1.0_f64, f64::min)
            })
            .sum();

        (total / query_tokens.len() as f64).clamp(0.0, 1.0)
    }
}

fn tokens_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut offset = 0;
    for token in text.split(' ') {
        if !token.is_empty() {
            out.push((offset, token));
        }
        offset += token.chars().count() + 1;
    }
    out
}

/// Similarity of a query token to a candidate token. Prefix credit only flows
/// one way: "ann" abbreviates "anniston", but candidate "ann" says nothing
/// about query "anniston".
fn token_similarity(query: &str, candidate: &str) -> f64 {
    if query == candidate {
        return 1.0;
    }
    let edit = normalized_damerau_levenshtein(query, candidate);
    let prefix = if query.len() >= 3 && candidate.starts_with(query) {
        PREFIX_SIMILARITY
    } else {
        0.0
    };
    edit.max(prefix)
}
