//! Match results and their deterministic ranking

use std::fmt;

use page_index::{ElementId, PageIndex};
use serde::{Deserialize, Serialize};

/// Diagnostic tag naming the rule that located a candidate.
///
/// Purely informational; the ranking never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum FoundBy {
    ById,
    ByName,
    ByLabel,
    ByLabelText,
    ByLabelElement,
    ByText,
    ByTitleAttribute,
    ByTitleText,
    ByAriaLabelAttribute,
    ByImgAltAttribute,
    ByImgTitleAttribute,
    ByImgSrcAttribute,
    ByImgNameAttribute,
    ByInnerImgAltAttribute,
    ByInnerImgTitleAttribute,
    ByInnerImgSrcAttribute,
    ByInnerImgNameAttribute,
    ByTableCoordinate,
    ByPage,
}

impl FoundBy {
    /// The classic diagnostic name.
    pub fn name(&self) -> &'static str {
        match self {
            FoundBy::ById => "BY_ID",
            FoundBy::ByName => "BY_NAME",
            FoundBy::ByLabel => "BY_LABEL",
            FoundBy::ByLabelText => "BY_LABEL_TEXT",
            FoundBy::ByLabelElement => "BY_LABEL_ELEMENT",
            FoundBy::ByText => "BY_TEXT",
            FoundBy::ByTitleAttribute => "BY_TITLE_ATTRIBUTE",
            FoundBy::ByTitleText => "BY_TITLE_TEXT",
            FoundBy::ByAriaLabelAttribute => "BY_ARIA_LABEL_ATTRIBUTE",
            FoundBy::ByImgAltAttribute => "BY_IMG_ALT_ATTRIBUTE",
            FoundBy::ByImgTitleAttribute => "BY_IMG_TITLE_ATTRIBUTE",
            FoundBy::ByImgSrcAttribute => "BY_IMG_SRC_ATTRIBUTE",
            FoundBy::ByImgNameAttribute => "BY_IMG_NAME_ATTRIBUTE",
            FoundBy::ByInnerImgAltAttribute => "BY_INNER_IMG_ALT_ATTRIBUTE",
            FoundBy::ByInnerImgTitleAttribute => "BY_INNER_IMG_TITLE_ATTRIBUTE",
            FoundBy::ByInnerImgSrcAttribute => "BY_INNER_IMG_SRC_ATTRIBUTE",
            FoundBy::ByInnerImgNameAttribute => "BY_INNER_IMG_NAME_ATTRIBUTE",
            FoundBy::ByTableCoordinate => "BY_TABLE_COORDINATE",
            FoundBy::ByPage => "BY_PAGE",
        }
    }
}

impl fmt::Display for FoundBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an [`Entry`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryTarget {
    /// The page itself (`$PAGE`).
    Page,
    /// A concrete element of the snapshot.
    Element(ElementId),
}

/// An immutable match result with its ranking numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The matched target.
    pub target: EntryTarget,
    /// The rule that produced the match.
    pub found_by: FoundBy,
    /// Match slack; 0 for an exact full match.
    pub deviation: usize,
    /// Offset from the satisfied preceding label to the match; 0 without
    /// preceding segments.
    pub distance: usize,
    /// Linear text offset of the match.
    pub start: usize,
}

impl Entry {
    /// A match on a concrete element.
    pub fn new(
        element: ElementId,
        found_by: FoundBy,
        deviation: usize,
        distance: usize,
        start: usize,
    ) -> Self {
        Self {
            target: EntryTarget::Element(element),
            found_by,
            deviation,
            distance,
            start,
        }
    }

    /// The `$PAGE` pseudo match, bypassing normal scoring.
    pub fn page() -> Self {
        Self {
            target: EntryTarget::Page,
            found_by: FoundBy::ByPage,
            deviation: 0,
            distance: 0,
            start: 0,
        }
    }

    /// The matched element, if the target is one.
    pub fn element(&self) -> Option<ElementId> {
        match self.target {
            EntryTarget::Element(id) => Some(id),
            EntryTarget::Page => None,
        }
    }

    pub(crate) fn sort_key(&self) -> (usize, usize, usize, usize) {
        let order = match self.target {
            EntryTarget::Page => 0,
            EntryTarget::Element(id) => id.0,
        };
        (self.deviation, self.distance, self.start, order)
    }

    /// Render the entry for diagnostics, resolving the element against
    /// its snapshot.
    pub fn describe(&self, page: &PageIndex) -> String {
        let target = match self.target {
            EntryTarget::Page => "[page]".to_string(),
            EntryTarget::Element(id) => page.describing_text(id),
        };
        format!(
            "{} found by: {} deviation: {} distance: {} start: {}",
            target, self.found_by, self.deviation, self.distance, self.start
        )
    }
}

/// Collection of match results from all identifiers.
///
/// `add_all` unions without de-duplication; identifiers already
/// guarantee at most one entry per element each, and any further policy
/// belongs to the caller.
#[derive(Debug, Clone, Default)]
pub struct WeightedControlList {
    entries: Vec<Entry>,
}

impl WeightedControlList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single entry.
    pub fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Union with another list.
    pub fn add_all(&mut self, other: WeightedControlList) {
        self.entries.extend(other.entries);
    }

    /// True if no entry was collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of collected entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// A fresh list ordered ascending by (deviation, distance, start,
    /// document order). This ordering is the engine's primary contract:
    /// stable and reproducible for fixed inputs.
    pub fn entries_sorted(&self) -> Vec<Entry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(Entry::sort_key);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: usize, deviation: usize, distance: usize, start: usize) -> Entry {
        Entry::new(ElementId(id), FoundBy::ByText, deviation, distance, start)
    }

    #[test]
    fn sorted_by_deviation_first() {
        let mut list = WeightedControlList::new();
        list.add(entry(1, 5, 0, 0));
        list.add(entry(2, 0, 9, 9));
        let sorted = list.entries_sorted();
        assert_eq!(sorted[0].element(), Some(ElementId(2)));
    }

    #[test]
    fn distance_breaks_deviation_ties() {
        let mut list = WeightedControlList::new();
        list.add(entry(1, 2, 7, 0));
        list.add(entry(2, 2, 3, 9));
        assert_eq!(list.entries_sorted()[0].element(), Some(ElementId(2)));
    }

    #[test]
    fn document_order_is_final_tiebreak() {
        let mut list = WeightedControlList::new();
        list.add(entry(7, 1, 1, 4));
        list.add(entry(3, 1, 1, 4));
        let sorted = list.entries_sorted();
        assert_eq!(sorted[0].element(), Some(ElementId(3)));
        assert_eq!(sorted[1].element(), Some(ElementId(7)));
    }

    #[test]
    fn sorting_does_not_mutate_insertion_order() {
        let mut list = WeightedControlList::new();
        list.add(entry(1, 5, 0, 0));
        list.add(entry(2, 0, 0, 0));
        let _ = list.entries_sorted();
        assert_eq!(list.entries()[0].element(), Some(ElementId(1)));
    }

    #[test]
    fn add_all_unions_without_dedup() {
        let mut a = WeightedControlList::new();
        a.add(entry(1, 0, 0, 0));
        let mut b = WeightedControlList::new();
        b.add(entry(1, 0, 0, 0));
        a.add_all(b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn entry_serializes_for_diagnostics() {
        let entry = entry(2, 0, 3, 7);
        let json = serde_json::to_value(entry).expect("serializes");
        assert_eq!(json["found_by"], "ByText");
        assert_eq!(json["distance"], 3);
    }

    #[test]
    fn page_entry_ranks_before_everything() {
        let mut list = WeightedControlList::new();
        list.add(entry(1, 0, 0, 5));
        list.add(Entry::page());
        assert_eq!(list.entries_sorted()[0].target, EntryTarget::Page);
    }
}
