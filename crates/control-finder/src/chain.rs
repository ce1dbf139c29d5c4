//! Preceding-label chains
//!
//! The preceding segments of a path must occur in the page text in
//! increasing flow order, each match starting at or after the previous
//! one's end. A candidate is only valid when the whole chain fits before
//! it; its distance is measured from the nearest chain-satisfying
//! occurrence of the final preceding segment.

use crate::config::FinderConfig;
use crate::errors::FinderError;
use crate::pattern::SearchPattern;
use crate::secret::SecretString;

/// The compiled preceding-label segments of a path, located once against
/// a page text.
#[derive(Debug, Clone)]
pub struct PathChain {
    patterns: Vec<SearchPattern>,
    /// End of the greedily matched chain; `None` when a segment cannot
    /// be found in order.
    min_end: Option<usize>,
    /// End of the chain without its final segment.
    prefix_end: usize,
}

impl PathChain {
    /// Compile the segments and locate them in the page text.
    pub fn build(
        nodes: &[SecretString],
        config: &FinderConfig,
        page_text: &str,
    ) -> Result<Self, FinderError> {
        let patterns = nodes
            .iter()
            .map(|n| SearchPattern::compile(n.value(), config.wildcard, config.case.text))
            .collect::<Result<Vec<_>, _>>()?;

        let mut from = 0;
        let mut prefix_end = 0;
        let mut min_end = Some(0);
        for (i, pattern) in patterns.iter().enumerate() {
            match pattern.first_occurrence(page_text, from) {
                Some(spot) => {
                    if i + 1 == patterns.len() {
                        prefix_end = from;
                    }
                    from = spot.end;
                    min_end = Some(spot.end);
                }
                None => {
                    min_end = None;
                    break;
                }
            }
        }

        Ok(Self {
            patterns,
            min_end,
            prefix_end,
        })
    }

    /// True when the page contains all segments in order (trivially true
    /// for an empty chain).
    pub fn is_satisfiable(&self) -> bool {
        self.min_end.is_some()
    }

    /// End position of the earliest complete chain match.
    pub fn min_end(&self) -> Option<usize> {
        self.min_end
    }

    /// Distance from the chain to a candidate starting at `start`.
    ///
    /// `None` rejects the candidate: the chain does not fit before it.
    /// An empty chain yields 0 for every candidate.
    pub fn distance_to(&self, page_text: &str, start: usize) -> Option<usize> {
        if self.patterns.is_empty() {
            return Some(0);
        }
        let min_end = self.min_end?;
        if min_end > start {
            return None;
        }
        // the nearest occurrence of the final segment that still leaves
        // room for the rest of the chain before it
        let last = self.patterns.last()?;
        let spot = last.last_occurrence_within(page_text, self.prefix_end, start)?;
        Some(start - spot.end)
    }
}
