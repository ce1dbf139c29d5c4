//! Error types for the identification engine

use thiserror::Error;

/// Identification error enumeration.
///
/// Only malformed input is an error; a path that matches nothing yields
/// an empty result list instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FinderError {
    /// The path contains no segments at all.
    #[error("Empty path; at least one segment is required")]
    EmptyPath,

    /// A bracketed segment is not a valid table coordinate.
    #[error("'{0}' is not a valid table coordinate")]
    InvalidTableCoordinate(String),

    /// Table coordinates must form one contiguous group.
    #[error("Only one group of table coordinates allowed")]
    MultipleCoordinateGroups,

    /// A criterion may contain at most one wildcard.
    #[error("Criterion '{0}' contains more than one wildcard")]
    MultipleWildcards(String),
}
