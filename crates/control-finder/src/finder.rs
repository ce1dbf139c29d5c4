//! Path resolution against a page snapshot
//!
//! The finder parses a path, runs the enabled identifiers and unions
//! their results. It never picks a winner: callers sort the returned
//! list and apply their own ambiguity policy.

use std::collections::HashSet;

use page_index::{ControlFamily, MouseAction, PageIndex};
use tracing::{debug, info};

use crate::config::FinderConfig;
use crate::errors::FinderError;
use crate::identifiers::IdentifierKind;
use crate::weighted::{Entry, WeightedControlList};
use crate::wpath::WPath;

/// The identification engine, parameterized by a [`FinderConfig`].
#[derive(Debug, Clone, Default)]
pub struct Finder {
    config: FinderConfig,
}

impl Finder {
    /// A finder with the given configuration.
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Parse `path` and resolve it; see [`Self::find`].
    pub fn identify(
        &self,
        path: &str,
        page: &PageIndex,
        kinds: &[IdentifierKind],
        mouse_action: Option<MouseAction>,
    ) -> Result<WeightedControlList, FinderError> {
        let wpath = WPath::parse(path, &self.config)?;
        self.find(&wpath, page, kinds, mouse_action)
    }

    /// Resolve a parsed path against a snapshot.
    ///
    /// Runs every kind in `kinds`, then the generic fallback over the
    /// families none of them claims, and unions the results. With a
    /// `mouse_action`, matches from unclaimed families are kept only
    /// when the element carries a listener for that action; recognized
    /// controls are actionable as such. An empty list means nothing
    /// matched; that is a result, not an error.
    pub fn find(
        &self,
        wpath: &WPath,
        page: &PageIndex,
        kinds: &[IdentifierKind],
        mouse_action: Option<MouseAction>,
    ) -> Result<WeightedControlList, FinderError> {
        if wpath.is_page_path() {
            let mut list = WeightedControlList::new();
            list.add(Entry::page());
            return Ok(list);
        }

        let claimed: HashSet<ControlFamily> = kinds
            .iter()
            .flat_map(|kind| kind.claimed_families())
            .copied()
            .collect();

        let mut result = WeightedControlList::new();
        for kind in kinds.iter().filter(|k| **k != IdentifierKind::Unknown) {
            let matches = kind.identify(wpath, page, &self.config, &claimed)?;
            if !matches.is_empty() {
                debug!(identifier = kind.name(), matches = matches.len(), "identifier matched");
            }
            result.add_all(matches);
        }

        // unclaimed markup (spans, divs, ...) stays locatable
        let fallback = IdentifierKind::Unknown.identify(wpath, page, &self.config, &claimed)?;
        if !fallback.is_empty() {
            debug!(matches = fallback.len(), "fallback matched");
        }
        result.add_all(fallback);

        if let Some(action) = mouse_action {
            result = filter_actionable(result, page, action, &claimed);
        }
        info!(path = %wpath, matches = result.len(), "path resolved");
        Ok(result)
    }
}

fn filter_actionable(
    list: WeightedControlList,
    page: &PageIndex,
    action: MouseAction,
    claimed: &HashSet<ControlFamily>,
) -> WeightedControlList {
    let mut filtered = WeightedControlList::new();
    for entry in list.entries() {
        let keep = match entry.element() {
            None => true,
            Some(id) => {
                let family = page.element(id).family;
                claimed.contains(&family) || page.has_listener(id, action)
            }
        };
        if keep {
            filtered.add(*entry);
        }
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::{clickable_set, mouse_action_set};
    use crate::weighted::EntryTarget;
    use page_index::PageIndexBuilder;

    #[test]
    fn page_token_resolves_to_the_page() {
        let page = PageIndexBuilder::new().build();
        let finder = Finder::default();
        let list = finder
            .identify("$PAGE", &page, clickable_set(), None)
            .expect("resolves");
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].target, EntryTarget::Page);
    }

    #[test]
    fn mouse_filter_drops_listenerless_plain_markup() {
        let mut builder = PageIndexBuilder::new();
        builder.open("span", ControlFamily::Unknown);
        builder.text("Expand");
        builder.close();
        let page = builder.build();
        let finder = Finder::default();

        let list = finder
            .identify("Expand", &page, mouse_action_set(), Some(MouseAction::Click))
            .expect("resolves");
        assert!(list.is_empty());
    }

    #[test]
    fn mouse_filter_keeps_markup_with_a_listener() {
        let mut builder = PageIndexBuilder::new();
        builder.open("span", ControlFamily::Unknown);
        builder.listener(MouseAction::Click);
        builder.text("Expand");
        builder.close();
        let page = builder.build();
        let finder = Finder::default();

        let list = finder
            .identify("Expand", &page, mouse_action_set(), Some(MouseAction::Click))
            .expect("resolves");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn recognized_controls_need_no_listener() {
        let mut builder = PageIndexBuilder::new();
        builder.open("a", ControlFamily::Anchor);
        builder.text("Details");
        builder.close();
        let page = builder.build();
        let finder = Finder::default();

        let list = finder
            .identify("Details", &page, mouse_action_set(), Some(MouseAction::Click))
            .expect("resolves");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn invalid_path_surfaces_the_parse_error() {
        let page = PageIndexBuilder::new().build();
        let finder = Finder::default();
        assert!(matches!(
            finder.identify("  ", &page, clickable_set(), None),
            Err(FinderError::EmptyPath)
        ));
    }
}
