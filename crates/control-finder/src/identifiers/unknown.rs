//! Generic fallback identifier
//!
//! Covers every element whose family no enabled kind claims, so plain
//! markup (spans, divs, list items) stays addressable for mouse actions.
//! Text matches collapse to the deepest matching element so a match on a
//! `<span>` does not also surface every ancestor container.

use std::collections::HashSet;

use page_index::{ControlFamily, PageIndex};

use crate::chain::PathChain;
use crate::config::FinderConfig;
use crate::errors::FinderError;
use crate::identifiers::rules::{self, Criteria, Rule};
use crate::identifiers::table;
use crate::weighted::{Entry, FoundBy, WeightedControlList};
use crate::wpath::WPath;

const RULES: &[Rule] = &[Rule::Id, Rule::OwnText, Rule::TitleText, Rule::AriaLabel];

pub(crate) fn identify(
    wpath: &WPath,
    page: &PageIndex,
    config: &FinderConfig,
    claimed: &HashSet<ControlFamily>,
) -> Result<WeightedControlList, FinderError> {
    let mut list = WeightedControlList::new();
    let Some(node) = wpath.last_node() else {
        // coordinate-only paths resolve through the family identifiers
        return Ok(list);
    };
    let chain = PathChain::build(wpath.path_nodes(), config, page.text())?;
    if !chain.is_satisfiable() {
        return Ok(list);
    }
    let criteria = Criteria::compile(node, config)?;

    let mut matched = Vec::new();
    for element in page
        .visible_elements()
        .filter(|e| !claimed.contains(&e.family))
    {
        if !wpath.table_coordinates().is_empty()
            && !table::element_in_coordinates(page, element.id, wpath, config)?
        {
            continue;
        }
        let Some(distance) = chain.distance_to(page.text(), element.spot.start) else {
            continue;
        };
        for rule in RULES {
            if let Some((found_by, deviation)) = rules::apply(*rule, &criteria, element, page) {
                matched.push(Entry::new(
                    element.id,
                    found_by,
                    deviation,
                    distance,
                    element.spot.start,
                ));
                break;
            }
        }
    }

    // keep only the deepest element of nested text matches
    for entry in &matched {
        if let (FoundBy::ByText, Some(id)) = (entry.found_by, entry.element()) {
            let shadowed = matched.iter().any(|other| {
                other.found_by == FoundBy::ByText
                    && other
                        .element()
                        .is_some_and(|inner| inner != id && page.is_ancestor(id, inner))
            });
            if shadowed {
                continue;
            }
        }
        list.add(*entry);
    }
    Ok(list)
}
