//! Text matching primitive
//!
//! A [`SearchPattern`] compares candidate text against a criterion and
//! reports the match slack ("deviation"): the number of characters of
//! the candidate not explicitly covered by the criterion. Lower is
//! better; an exact full match has deviation 0.

use page_index::FindSpot;

use crate::errors::FinderError;

/// A compiled criterion.
///
/// Three shapes exist: the trivial pattern (empty criterion or a lone
/// wildcard), a literal, and a single-wildcard prefix/suffix pair. More
/// than one wildcard is rejected at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPattern {
    /// Matches any text. `via_wildcard` decides whether the consumed
    /// characters count as slack.
    MatchAll {
        /// True when compiled from a lone wildcard, false for the empty
        /// criterion.
        via_wildcard: bool,
    },
    /// Criterion without a wildcard.
    Literal {
        /// The (case-folded) criterion text.
        text: String,
        /// Case-insensitive comparison.
        ci: bool,
    },
    /// Criterion with exactly one wildcard.
    Wildcard {
        /// Text before the wildcard, possibly empty.
        prefix: String,
        /// Text after the wildcard, possibly empty.
        suffix: String,
        /// Case-insensitive comparison.
        ci: bool,
    },
}

impl SearchPattern {
    /// Compile a criterion.
    pub fn compile(
        raw: &str,
        wildcard: char,
        case_sensitive: bool,
    ) -> Result<Self, FinderError> {
        let ci = !case_sensitive;
        let mut parts = raw.split(wildcard);
        let first = parts.next().unwrap_or_default();
        let Some(second) = parts.next() else {
            // no wildcard
            if raw.is_empty() {
                return Ok(SearchPattern::MatchAll {
                    via_wildcard: false,
                });
            }
            return Ok(SearchPattern::Literal {
                text: fold(first, ci),
                ci,
            });
        };
        if parts.next().is_some() {
            return Err(FinderError::MultipleWildcards(raw.to_string()));
        }
        if first.is_empty() && second.is_empty() {
            return Ok(SearchPattern::MatchAll { via_wildcard: true });
        }
        Ok(SearchPattern::Wildcard {
            prefix: fold(first, ci),
            suffix: fold(second, ci),
            ci,
        })
    }

    /// True if the pattern matches any text.
    pub fn is_match_all(&self) -> bool {
        matches!(self, SearchPattern::MatchAll { .. })
    }

    /// Whole-string match (the "exact" rule).
    ///
    /// Returns the deviation: 0 for a literal match, the number of
    /// characters consumed by the wildcard otherwise.
    pub fn matches(&self, text: &str) -> Option<usize> {
        match self {
            SearchPattern::MatchAll { via_wildcard } => {
                Some(if *via_wildcard { char_count(text) } else { 0 })
            }
            SearchPattern::Literal { text: crit, ci } => {
                if fold(text, *ci) == *crit {
                    Some(0)
                } else {
                    None
                }
            }
            SearchPattern::Wildcard { prefix, suffix, ci } => {
                let folded = fold(text, *ci);
                if folded.len() >= prefix.len() + suffix.len()
                    && folded.starts_with(prefix.as_str())
                    && folded.ends_with(suffix.as_str())
                {
                    Some(char_count(&folded[prefix.len()..folded.len() - suffix.len()]))
                } else {
                    None
                }
            }
        }
    }

    /// Substring match (the "contains" rule).
    ///
    /// Returns the deviation: characters of the candidate not covered by
    /// the shortest occurrence of the criterion.
    pub fn surrounding_chars(&self, text: &str) -> Option<usize> {
        match self {
            SearchPattern::MatchAll { via_wildcard } => {
                Some(if *via_wildcard { char_count(text) } else { 0 })
            }
            SearchPattern::Literal { text: crit, ci } => {
                if fold(text, *ci).contains(crit.as_str()) {
                    Some(char_count(text) - char_count(crit))
                } else {
                    None
                }
            }
            SearchPattern::Wildcard { prefix, suffix, ci } => {
                let folded = fold(text, *ci);
                let at = folded.find(prefix.as_str())?;
                folded[at + prefix.len()..].find(suffix.as_str())?;
                Some(char_count(&folded) - char_count(prefix) - char_count(suffix))
            }
        }
    }

    /// First occurrence at or after `from`.
    pub fn first_occurrence(&self, text: &str, from: usize) -> Option<FindSpot> {
        if from > text.len() {
            return None;
        }
        match self {
            SearchPattern::MatchAll { .. } => Some(FindSpot::at(from)),
            SearchPattern::Literal { text: crit, ci } => {
                let folded = fold(text, *ci);
                let start = folded[from..].find(crit.as_str())? + from;
                Some(FindSpot::new(start, start + crit.len()))
            }
            SearchPattern::Wildcard { prefix, suffix, ci } => {
                let folded = fold(text, *ci);
                let start = folded[from..].find(prefix.as_str())? + from;
                let gap = start + prefix.len();
                let end = folded[gap..].find(suffix.as_str())? + gap + suffix.len();
                Some(FindSpot::new(start, end))
            }
        }
    }

    /// Last occurrence starting at or after `floor` and ending at or
    /// before `limit`.
    pub fn last_occurrence_within(
        &self,
        text: &str,
        floor: usize,
        limit: usize,
    ) -> Option<FindSpot> {
        if floor > limit || limit > text.len() {
            return None;
        }
        match self {
            SearchPattern::MatchAll { .. } => Some(FindSpot::at(limit)),
            SearchPattern::Literal { text: crit, ci } => {
                let folded = fold(text, *ci);
                let start = folded[floor..limit].rfind(crit.as_str())? + floor;
                Some(FindSpot::new(start, start + crit.len()))
            }
            SearchPattern::Wildcard { prefix, suffix, ci } => {
                let folded = fold(text, *ci);
                let window = &folded[floor..limit];
                let suffix_start = window.rfind(suffix.as_str())? + floor;
                let start = folded[floor..suffix_start].rfind(prefix.as_str())? + floor;
                Some(FindSpot::new(start, suffix_start + suffix.len()))
            }
        }
    }
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}

fn fold(text: &str, ci: bool) -> String {
    if ci {
        text.to_ascii_lowercase()
    } else {
        text.to_string()
    }
}
