//! Image attribute matching
//!
//! Images are identified by their alt text, title, source path or name.
//! Source paths compare against the basename case-sensitively; matching
//! only the basename costs the stripped leading path as deviation.

use page_index::PageElement;

use crate::identifiers::rules::Criteria;
use crate::pattern::SearchPattern;
use crate::weighted::FoundBy;

/// Match the attributes of an image element.
///
/// `inner` selects the BY_INNER_IMG_* tags used when the image is
/// wrapped by the control actually being identified.
pub(crate) fn match_attributes(
    criteria: &Criteria,
    image: &PageElement,
    inner: bool,
) -> Option<(FoundBy, usize)> {
    if let Some(alt) = image.attribute("alt").filter(|v| !v.is_empty()) {
        if let Some(deviation) = criteria.attr.surrounding_chars(alt) {
            let tag = if inner {
                FoundBy::ByInnerImgAltAttribute
            } else {
                FoundBy::ByImgAltAttribute
            };
            return Some((tag, deviation));
        }
    }
    if let Some(title) = image.attribute("title").filter(|v| !v.is_empty()) {
        if let Some(deviation) = criteria.attr.surrounding_chars(title) {
            let tag = if inner {
                FoundBy::ByInnerImgTitleAttribute
            } else {
                FoundBy::ByImgTitleAttribute
            };
            return Some((tag, deviation));
        }
    }
    if let Some(src) = image.attribute("src").filter(|v| !v.is_empty()) {
        if let Some(deviation) = src_deviation(&criteria.file, src) {
            let tag = if inner {
                FoundBy::ByInnerImgSrcAttribute
            } else {
                FoundBy::ByImgSrcAttribute
            };
            return Some((tag, deviation));
        }
    }
    if let Some(name) = image.name_attribute() {
        if let Some(deviation) = criteria.name.matches(name) {
            let tag = if inner {
                FoundBy::ByInnerImgNameAttribute
            } else {
                FoundBy::ByImgNameAttribute
            };
            return Some((tag, deviation));
        }
    }
    None
}

/// Deviation of a criterion against a source path.
///
/// A full-path match costs nothing extra; a basename match costs the
/// length of the stripped leading path.
pub(crate) fn src_deviation(pattern: &SearchPattern, src: &str) -> Option<usize> {
    if let Some(deviation) = pattern.matches(src) {
        return Some(deviation);
    }
    let basename = src.rsplit('/').next()?;
    if basename.len() == src.len() {
        return None;
    }
    let stripped = src[..src.len() - basename.len()].chars().count();
    pattern.matches(basename).map(|deviation| deviation + stripped)
}
