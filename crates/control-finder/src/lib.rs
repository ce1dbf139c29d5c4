//! Control identification for page snapshots
//!
//! Resolves human-readable path expressions like
//! `"Billing > Last name"` or `"[Amount; Row 3] > Submit"` against an
//! indexed page snapshot. Every identifier contributes weighted match
//! candidates; the caller sorts the union and decides how to handle
//! ambiguity.
//!
//! The moving parts:
//!
//! - [`WPath`]: the parsed path, preceding labels plus one target
//!   criterion, optionally scoped by table coordinates
//! - [`SearchPattern`]: compiled criterion with `*` wildcards
//! - [`IdentifierKind`]: one rule table per control family, enabled
//!   explicitly per call site
//! - [`WeightedControlList`]: all candidates with their deterministic
//!   (deviation, distance, start, document order) ranking
//! - [`Finder`]: ties it together

mod chain;
mod config;
mod errors;
mod finder;
pub mod identifiers;
mod pattern;
mod secret;
mod weighted;
mod wpath;

pub use chain::PathChain;
pub use config::{CasePolicy, FinderConfig};
pub use errors::FinderError;
pub use finder::Finder;
pub use identifiers::{
    clickable_set, mouse_action_set, selectable_set, settable_set, IdentifierKind,
};
pub use pattern::SearchPattern;
pub use secret::SecretString;
pub use weighted::{Entry, EntryTarget, FoundBy, WeightedControlList};
pub use wpath::{TableCoordinate, WPath, PAGE_TOKEN};
