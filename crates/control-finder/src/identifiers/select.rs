//! Options located through their select
//!
//! The final path segment names an option; the segment before it (if
//! any) names the select carrying the option, by labeling text, name,
//! id or an associated label. With no preceding segment every visible
//! select is searched.

use page_index::{ControlFamily, ElementId, PageElement, PageIndex};
use tracing::trace;

use crate::chain::PathChain;
use crate::config::FinderConfig;
use crate::errors::FinderError;
use crate::identifiers::EntrySet;
use crate::identifiers::rules::Criteria;
use crate::pattern::SearchPattern;
use crate::weighted::{Entry, FoundBy, WeightedControlList};
use crate::wpath::WPath;

pub(crate) fn identify(
    wpath: &WPath,
    page: &PageIndex,
    config: &FinderConfig,
) -> Result<WeightedControlList, FinderError> {
    let mut found = EntrySet::new();
    let Some(last) = wpath.last_node() else {
        return Ok(found.into_list());
    };
    let option_pattern = SearchPattern::compile(last.value(), config.wildcard, config.case.text)?;

    let (select_node, chain_nodes) = match wpath.path_nodes().split_last() {
        Some((node, rest)) => (Some(node), rest),
        None => (None, wpath.path_nodes()),
    };
    let chain = PathChain::build(chain_nodes, config, page.text())?;
    if !chain.is_satisfiable() {
        return Ok(found.into_list());
    }
    let criteria = select_node
        .map(|node| Criteria::compile(node, config))
        .transpose()?;

    for select in page
        .visible_elements()
        .filter(|e| e.family == ControlFamily::Select)
    {
        let Some(distance) = chain.distance_to(page.text(), select.spot.start) else {
            continue;
        };
        if !select_matches(select, criteria.as_ref(), page) {
            continue;
        }
        trace!(select = %select.id, distance, "select matched, scanning options");
        add_options(page, select.id, &option_pattern, distance, &mut found);
    }

    // labels naming a select: <label for> or a label wrapping it
    if let Some(criteria) = criteria.as_ref() {
        for label in page
            .visible_elements()
            .filter(|e| e.family == ControlFamily::Label)
        {
            let Some(distance) = chain.distance_to(page.text(), label.spot.start) else {
                continue;
            };
            let text = page.text_without_form_controls(label.id);
            if text.is_empty() || criteria.text.surrounding_chars(&text).is_none() {
                continue;
            }
            if let Some(for_id) = label.attribute("for").filter(|v| !v.is_empty()) {
                if let Some(target) = page.element_by_html_id(for_id) {
                    if target.family == ControlFamily::Select && target.visible {
                        add_options(page, target.id, &option_pattern, distance, &mut found);
                    }
                }
            }
            for nested in page
                .descendants(label.id)
                .filter(|e| e.family == ControlFamily::Select && e.visible)
            {
                add_options(page, nested.id, &option_pattern, distance, &mut found);
            }
        }
    }

    Ok(found.into_list())
}

fn select_matches(select: &PageElement, criteria: Option<&Criteria>, page: &PageIndex) -> bool {
    let Some(criteria) = criteria else {
        // no scoping segment, every select qualifies
        return true;
    };
    let labeling = page.labeling_text_before(select.id, 0);
    if !labeling.is_empty() && criteria.text.surrounding_chars(labeling).is_some() {
        return true;
    }
    if let Some(name) = select.name_attribute() {
        if criteria.name.matches(name).is_some() {
            return true;
        }
    }
    if let Some(id) = select.html_id() {
        if criteria.id.matches(id).is_some() {
            return true;
        }
    }
    false
}

fn add_options(
    page: &PageIndex,
    select: ElementId,
    pattern: &SearchPattern,
    distance: usize,
    found: &mut EntrySet,
) {
    for option in page
        .descendants(select)
        .filter(|e| e.family == ControlFamily::OptionInSelect && e.visible)
    {
        let texts = [
            Some(page.inner_text(option.id).trim().to_string()),
            option.attribute("label").map(str::to_string),
            option.attribute("value").map(str::to_string),
        ];
        let deviation = texts
            .into_iter()
            .flatten()
            .filter(|t| !t.is_empty())
            .filter_map(|t| pattern.surrounding_chars(&t))
            .min();
        if let Some(deviation) = deviation {
            found.insert(Entry::new(
                option.id,
                FoundBy::ByLabel,
                deviation,
                distance,
                option.spot.start,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_index::PageIndexBuilder;

    fn page_with_selects() -> PageIndex {
        let mut builder = PageIndexBuilder::new();
        builder.open("p", ControlFamily::Unknown);
        builder.text("Color");
        builder.close();
        builder.open("select", ControlFamily::Select);
        builder.attr("id", "colors");
        for (value, text) in [("r", "red"), ("g", "green")] {
            builder.open("option", ControlFamily::OptionInSelect);
            builder.attr("value", value);
            builder.text(text);
            builder.close();
        }
        builder.close();
        builder.open("p", ControlFamily::Unknown);
        builder.text("Size");
        builder.close();
        builder.open("select", ControlFamily::Select);
        builder.attr("id", "sizes");
        for text in ["small", "large"] {
            builder.open("option", ControlFamily::OptionInSelect);
            builder.text(text);
            builder.close();
        }
        builder.close();
        builder.build()
    }

    fn identify_path(page: &PageIndex, path: &str) -> Vec<Entry> {
        let config = FinderConfig::default();
        let wpath = WPath::parse(path, &config).expect("parses");
        identify(&wpath, page, &config)
            .expect("identifies")
            .entries_sorted()
    }

    #[test]
    fn option_found_in_any_select_without_scoping() {
        let page = page_with_selects();
        let entries = identify_path(&page, "green");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].found_by, FoundBy::ByLabel);
        assert_eq!(entries[0].deviation, 0);
        assert_eq!(entries[0].distance, 0);
    }

    #[test]
    fn option_found_by_value_attribute() {
        let page = page_with_selects();
        let entries = identify_path(&page, "g");
        // value "g" matches exactly, texts only partially
        assert_eq!(entries[0].deviation, 0);
    }

    #[test]
    fn scoping_by_labeling_text() {
        let page = page_with_selects();
        // both selects contain no "banana"; scoping by "Size" only
        // searches the second select
        assert!(identify_path(&page, "Size > red").is_empty());
        let entries = identify_path(&page, "Size > small");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn scoping_by_select_id() {
        let page = page_with_selects();
        let entries = identify_path(&page, "sizes > large");
        assert_eq!(entries.len(), 1);
    }
}
