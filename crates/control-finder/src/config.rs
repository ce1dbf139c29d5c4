//! Static configuration of the identification engine
//!
//! Owned by the caller, read by the engine; fixed for the lifetime of a
//! request.

use serde::{Deserialize, Serialize};

/// Case sensitivity per rule family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasePolicy {
    /// `id` attribute matching.
    pub ids: bool,
    /// `name` attribute matching.
    pub names: bool,
    /// Visible text, captions and label matching.
    pub text: bool,
    /// `title`, `alt` and `aria-label` attribute matching.
    pub attributes: bool,
}

impl Default for CasePolicy {
    fn default() -> Self {
        // ids and names identify, text describes
        Self {
            ids: true,
            names: true,
            text: false,
            attributes: false,
        }
    }
}

/// Configuration of path parsing and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Token separating path segments.
    pub separator: char,
    /// Wildcard character inside a criterion.
    pub wildcard: char,
    /// Case sensitivity per rule family.
    pub case: CasePolicy,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            separator: '>',
            wildcard: '*',
            case: CasePolicy::default(),
        }
    }
}
