//! Per-family identifiers
//!
//! Each [`IdentifierKind`] names one control family (or a small group of
//! closely related families), carries an ordered rule table and claims
//! the families it is responsible for. Call sites enable an explicit set
//! of kinds; the generic fallback covers everything left unclaimed.

use std::collections::{BTreeMap, HashSet};

use page_index::{ControlFamily, ElementId, PageIndex};
use tracing::debug;

use crate::chain::PathChain;
use crate::config::FinderConfig;
use crate::errors::FinderError;
use crate::weighted::{Entry, FoundBy, WeightedControlList};
use crate::wpath::WPath;

pub(crate) mod image;
pub(crate) mod rules;
mod select;
pub(crate) mod table;
mod unknown;

use rules::{Criteria, Rule};

/// The identifier for one control family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// Anchors, by text, id, name or a wrapped image.
    Anchor,
    /// Buttons of any flavor, by caption.
    Button,
    /// Checkboxes, by label.
    Checkbox,
    /// Radio buttons, by label.
    RadioButton,
    /// Selects and multi-selects themselves.
    Select,
    /// Options located through their select.
    OptionInSelect,
    /// Standalone images.
    Image,
    /// Single-line text inputs, passwords and file uploads.
    InputText,
    /// Multi-line text areas.
    TextArea,
    /// Label elements as targets of their own.
    Label,
    /// Fallback over families no enabled kind claims; the finder always
    /// runs it after the family kinds.
    Unknown,
}

impl IdentifierKind {
    /// Lowercase name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            IdentifierKind::Anchor => "anchor",
            IdentifierKind::Button => "button",
            IdentifierKind::Checkbox => "checkbox",
            IdentifierKind::RadioButton => "radio-button",
            IdentifierKind::Select => "select",
            IdentifierKind::OptionInSelect => "option-in-select",
            IdentifierKind::Image => "image",
            IdentifierKind::InputText => "input-text",
            IdentifierKind::TextArea => "text-area",
            IdentifierKind::Label => "label",
            IdentifierKind::Unknown => "unknown",
        }
    }

    /// The families this kind takes responsibility for; the fallback
    /// skips all of them.
    pub fn claimed_families(&self) -> &'static [ControlFamily] {
        match self {
            IdentifierKind::Anchor => &[ControlFamily::Anchor],
            IdentifierKind::Button => &[ControlFamily::Button],
            IdentifierKind::Checkbox => &[ControlFamily::Checkbox],
            IdentifierKind::RadioButton => &[ControlFamily::RadioButton],
            IdentifierKind::Select => &[ControlFamily::Select],
            IdentifierKind::OptionInSelect => {
                &[ControlFamily::Select, ControlFamily::OptionInSelect]
            }
            IdentifierKind::Image => &[ControlFamily::Image, ControlFamily::ImageButton],
            IdentifierKind::InputText => &[
                ControlFamily::InputText,
                ControlFamily::InputPassword,
                ControlFamily::InputFile,
            ],
            IdentifierKind::TextArea => &[ControlFamily::TextArea],
            IdentifierKind::Label => &[ControlFamily::Label],
            IdentifierKind::Unknown => &[],
        }
    }

    fn supports(&self, family: ControlFamily) -> bool {
        self.claimed_families().contains(&family)
    }

    /// The ordered rule table, evaluated top-to-bottom per element.
    fn rule_table(&self) -> &'static [Rule] {
        match self {
            IdentifierKind::Anchor => &[
                Rule::Id,
                Rule::Name,
                Rule::OwnText,
                Rule::TitleAttribute,
                Rule::AriaLabel,
                Rule::InnerImage,
            ],
            IdentifierKind::Button => &[
                Rule::Id,
                Rule::Name,
                Rule::Caption,
                Rule::TitleAttribute,
                Rule::AriaLabel,
                Rule::InnerImage,
            ],
            IdentifierKind::Checkbox | IdentifierKind::RadioButton => &[
                Rule::Id,
                Rule::Name,
                Rule::LabelFor,
                Rule::LabelElement,
                Rule::TitleAttribute,
                Rule::AriaLabel,
            ],
            IdentifierKind::Select => &[
                Rule::Id,
                Rule::Name,
                Rule::LabelFor,
                Rule::LabelingTextBefore,
                Rule::TitleAttribute,
            ],
            IdentifierKind::Image => &[Rule::Id, Rule::ImageAttributes],
            IdentifierKind::InputText | IdentifierKind::TextArea => &[
                Rule::Id,
                Rule::Name,
                Rule::LabelFor,
                Rule::LabelElement,
                Rule::LabelingTextBefore,
                Rule::TitleAttribute,
                Rule::AriaLabel,
            ],
            IdentifierKind::Label => &[Rule::Id, Rule::OwnText, Rule::TitleAttribute],
            // dispatched to dedicated implementations
            IdentifierKind::OptionInSelect | IdentifierKind::Unknown => &[],
        }
    }

    /// Run this identifier against a snapshot.
    ///
    /// `claimed` is the union of [`Self::claimed_families`] over all
    /// enabled kinds; only the fallback looks at it.
    pub fn identify(
        &self,
        wpath: &WPath,
        page: &PageIndex,
        config: &FinderConfig,
        claimed: &HashSet<ControlFamily>,
    ) -> Result<WeightedControlList, FinderError> {
        match self {
            IdentifierKind::OptionInSelect => select::identify(wpath, page, config),
            IdentifierKind::Unknown => unknown::identify(wpath, page, config, claimed),
            kind => run_rules(*kind, wpath, page, config),
        }
    }
}

/// Identifier kinds for click-style actions.
pub fn clickable_set() -> &'static [IdentifierKind] {
    &[
        IdentifierKind::Anchor,
        IdentifierKind::Button,
        IdentifierKind::Image,
        IdentifierKind::Label,
    ]
}

/// Identifier kinds for set-style actions on text controls.
pub fn settable_set() -> &'static [IdentifierKind] {
    &[IdentifierKind::InputText, IdentifierKind::TextArea]
}

/// Identifier kinds for select/deselect-style actions.
pub fn selectable_set() -> &'static [IdentifierKind] {
    &[
        IdentifierKind::Checkbox,
        IdentifierKind::RadioButton,
        IdentifierKind::Select,
        IdentifierKind::OptionInSelect,
    ]
}

/// Identifier kinds for generic mouse actions, the union of all
/// family-specific kinds.
pub fn mouse_action_set() -> &'static [IdentifierKind] {
    &[
        IdentifierKind::Anchor,
        IdentifierKind::Button,
        IdentifierKind::Checkbox,
        IdentifierKind::RadioButton,
        IdentifierKind::Select,
        IdentifierKind::OptionInSelect,
        IdentifierKind::Image,
        IdentifierKind::InputText,
        IdentifierKind::TextArea,
        IdentifierKind::Label,
    ]
}

/// At most one entry per element, keeping the better-ranked one.
#[derive(Debug, Default)]
pub(crate) struct EntrySet {
    entries: BTreeMap<ElementId, Entry>,
}

impl EntrySet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, entry: Entry) {
        let Some(id) = entry.element() else {
            return;
        };
        self.entries
            .entry(id)
            .and_modify(|existing| {
                if entry.sort_key() < existing.sort_key() {
                    *existing = entry;
                }
            })
            .or_insert(entry);
    }

    pub(crate) fn into_list(self) -> WeightedControlList {
        let mut list = WeightedControlList::new();
        for entry in self.entries.into_values() {
            list.add(entry);
        }
        list
    }
}

/// The shared rule-table engine behind all family identifiers.
fn run_rules(
    kind: IdentifierKind,
    wpath: &WPath,
    page: &PageIndex,
    config: &FinderConfig,
) -> Result<WeightedControlList, FinderError> {
    let mut found = EntrySet::new();
    let chain = PathChain::build(wpath.path_nodes(), config, page.text())?;
    if !chain.is_satisfiable() {
        debug!(identifier = kind.name(), path = %wpath, "label chain not present, skipping");
        return Ok(found.into_list());
    }

    match wpath.last_node() {
        None => {
            // coordinate-only path: every supported element inside the
            // addressed cell(s) matches outright
            if wpath.table_coordinates().is_empty() {
                return Ok(found.into_list());
            }
            for element in page.visible_elements().filter(|e| kind.supports(e.family)) {
                if !table::element_in_coordinates(page, element.id, wpath, config)? {
                    continue;
                }
                let Some(distance) = chain.distance_to(page.text(), element.spot.start) else {
                    continue;
                };
                found.insert(Entry::new(
                    element.id,
                    FoundBy::ByTableCoordinate,
                    0,
                    distance,
                    element.spot.start,
                ));
            }
        }
        Some(node) => {
            let criteria = Criteria::compile(node, config)?;
            for element in page.visible_elements().filter(|e| kind.supports(e.family)) {
                if !wpath.table_coordinates().is_empty()
                    && !table::element_in_coordinates(page, element.id, wpath, config)?
                {
                    continue;
                }
                let Some(distance) = chain.distance_to(page.text(), element.spot.start) else {
                    continue;
                };
                for rule in kind.rule_table() {
                    if let Some((found_by, deviation)) = rules::apply(*rule, &criteria, element, page)
                    {
                        found.insert(Entry::new(
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
        }
    }

    Ok(found.into_list())
}
