//! Read-only page snapshot model for control identification
//!
//! A [`PageIndex`] is an immutable value describing one state of a
//! rendered page: elements in document order with their classification,
//! attributes, visibility, text offsets and table membership, plus the
//! linearized page text. It is rebuilt by the page provider whenever the
//! underlying page changes and shared read-only across identification
//! requests.

pub mod builder;
pub mod element;
pub mod index;

pub use builder::PageIndexBuilder;
pub use element::{CellRef, ControlFamily, ElementId, FindSpot, MouseAction, PageElement};
pub use index::{PageIndex, TableGrid};
