//! Rule families shared by the identifiers
//!
//! Every identifier owns an ordered table of [`Rule`]s evaluated
//! top-to-bottom per element; the first successful rule wins. The rule
//! order encodes the precedence id > name > label > text > title/aria >
//! image.

use page_index::{ControlFamily, PageElement, PageIndex};

use crate::config::FinderConfig;
use crate::errors::FinderError;
use crate::identifiers::image;
use crate::pattern::SearchPattern;
use crate::secret::SecretString;
use crate::weighted::FoundBy;

/// A single matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rule {
    /// Final segment vs the `id` attribute, whole-string.
    Id,
    /// Final segment vs the `name` attribute, whole-string.
    Name,
    /// Text of a `<label for>` pointing at the element.
    LabelFor,
    /// Text of an enclosing `<label>`.
    LabelElement,
    /// The element's own visible text.
    OwnText,
    /// The element's caption: own text or `value` attribute.
    Caption,
    /// The labeling text directly before the element.
    LabelingTextBefore,
    /// The `title` attribute.
    TitleAttribute,
    /// The `title` attribute of unclaimed markup; tagged separately from
    /// the form-control title rule.
    TitleText,
    /// The `aria-label` attribute.
    AriaLabel,
    /// alt/title/src/name of the image element itself.
    ImageAttributes,
    /// alt/title/src/name of a wrapped image.
    InnerImage,
}

/// The final path segment compiled once per rule family.
pub(crate) struct Criteria {
    /// Whole-string pattern for `id` attributes.
    pub id: SearchPattern,
    /// Whole-string pattern for `name` attributes.
    pub name: SearchPattern,
    /// Substring pattern for visible text and labels.
    pub text: SearchPattern,
    /// Substring pattern for descriptive attributes.
    pub attr: SearchPattern,
    /// Whole-string pattern for file paths; always case-sensitive.
    pub file: SearchPattern,
}

impl Criteria {
    pub(crate) fn compile(
        node: &SecretString,
        config: &FinderConfig,
    ) -> Result<Self, FinderError> {
        let raw = node.value();
        let w = config.wildcard;
        Ok(Self {
            id: SearchPattern::compile(raw, w, config.case.ids)?,
            name: SearchPattern::compile(raw, w, config.case.names)?,
            text: SearchPattern::compile(raw, w, config.case.text)?,
            attr: SearchPattern::compile(raw, w, config.case.attributes)?,
            file: SearchPattern::compile(raw, w, true)?,
        })
    }
}

/// Evaluate one rule against one element.
///
/// Returns the diagnostic tag and the deviation on success.
pub(crate) fn apply(
    rule: Rule,
    criteria: &Criteria,
    element: &PageElement,
    page: &PageIndex,
) -> Option<(FoundBy, usize)> {
    match rule {
        Rule::Id => {
            let id = element.html_id()?;
            criteria.id.matches(id).map(|d| (FoundBy::ById, d))
        }
        Rule::Name => {
            let name = element.name_attribute()?;
            criteria.name.matches(name).map(|d| (FoundBy::ByName, d))
        }
        Rule::LabelFor => {
            let html_id = element.html_id()?;
            let mut best: Option<usize> = None;
            for label in page.labels_for(html_id) {
                let text = page.text_without_form_controls(label.id);
                if text.is_empty() {
                    continue;
                }
                if let Some(deviation) = criteria.text.surrounding_chars(&text) {
                    best = Some(best.map_or(deviation, |b| b.min(deviation)));
                }
            }
            best.map(|d| (FoundBy::ByLabel, d))
        }
        Rule::LabelElement => {
            let label = page.ancestor_label(element.id)?;
            if !label.visible {
                return None;
            }
            let text = page.text_without_form_controls(label.id);
            if text.is_empty() {
                return None;
            }
            criteria
                .text
                .surrounding_chars(&text)
                .map(|d| (FoundBy::ByLabelElement, d))
        }
        Rule::OwnText => {
            let text = page.inner_text(element.id).trim();
            if text.is_empty() {
                return None;
            }
            criteria
                .text
                .surrounding_chars(text)
                .map(|d| (FoundBy::ByText, d))
        }
        Rule::Caption => {
            let own = page.inner_text(element.id).trim();
            let caption = if own.is_empty() {
                element.attribute("value").unwrap_or_default().trim()
            } else {
                own
            };
            if caption.is_empty() {
                return None;
            }
            criteria
                .text
                .surrounding_chars(caption)
                .map(|d| (FoundBy::ByLabelText, d))
        }
        Rule::LabelingTextBefore => {
            let text = page.labeling_text_before(element.id, 0);
            if text.is_empty() {
                return None;
            }
            // nearer to the control is better: slack is the tail after
            // the last occurrence
            let spot = criteria.text.last_occurrence_within(text, 0, text.len())?;
            Some((FoundBy::ByLabelText, text[spot.end..].chars().count()))
        }
        Rule::TitleAttribute => {
            let title = element.attribute("title").filter(|v| !v.is_empty())?;
            criteria
                .attr
                .surrounding_chars(title)
                .map(|d| (FoundBy::ByTitleAttribute, d))
        }
        Rule::TitleText => {
            let title = element.attribute("title").filter(|v| !v.is_empty())?;
            criteria
                .attr
                .surrounding_chars(title)
                .map(|d| (FoundBy::ByTitleText, d))
        }
        Rule::AriaLabel => {
            let label = element.attribute("aria-label").filter(|v| !v.is_empty())?;
            criteria
                .attr
                .surrounding_chars(label)
                .map(|d| (FoundBy::ByAriaLabelAttribute, d))
        }
        Rule::ImageAttributes => image::match_attributes(criteria, element, false),
        Rule::InnerImage => page
            .descendants(element.id)
            .filter(|e| e.family == ControlFamily::Image && e.visible)
            .find_map(|img| image::match_attributes(criteria, img, true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_index::PageIndexBuilder;

    fn criteria(raw: &str) -> Criteria {
        Criteria::compile(&SecretString::new(raw), &FinderConfig::default()).expect("compiles")
    }

    #[test]
    fn id_rule_is_exact() {
        let mut builder = PageIndexBuilder::new();
        builder.control("a", ControlFamily::Anchor, &[("id", "myId")]);
        let page = builder.build();
        let element = page.element(page_index::ElementId(0));

        assert_eq!(
            apply(Rule::Id, &criteria("myId"), element, &page),
            Some((FoundBy::ById, 0))
        );
        // substring of an id is not a match
        assert_eq!(apply(Rule::Id, &criteria("yI"), element, &page), None);
    }

    #[test]
    fn label_for_rule_uses_label_text() {
        let mut builder = PageIndexBuilder::new();
        builder.open("label", ControlFamily::Label);
        builder.attr("for", "cb");
        builder.text("Remember me");
        builder.close();
        builder.control("input", ControlFamily::Checkbox, &[("id", "cb")]);
        let page = builder.build();
        let checkbox = page.element_by_html_id("cb").expect("checkbox");

        assert_eq!(
            apply(Rule::LabelFor, &criteria("Remember me"), checkbox, &page),
            Some((FoundBy::ByLabel, 0))
        );
        assert_eq!(
            apply(Rule::LabelFor, &criteria("Remember"), checkbox, &page),
            Some((FoundBy::ByLabel, 3))
        );
    }

    #[test]
    fn labeling_text_prefers_the_nearest_occurrence() {
        let mut builder = PageIndexBuilder::new();
        builder.open("span", ControlFamily::Unknown);
        builder.text("Phone Phone again");
        builder.close();
        builder.control("input", ControlFamily::InputText, &[("id", "p")]);
        let page = builder.build();
        let input = page.element_by_html_id("p").expect("input");

        // "Phone Phone again": last occurrence ends 6 chars before the end
        assert_eq!(
            apply(Rule::LabelingTextBefore, &criteria("Phone"), input, &page),
            Some((FoundBy::ByLabelText, 6))
        );
    }
}
