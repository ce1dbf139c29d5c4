//! Table coordinate constraints
//!
//! A coordinate group `[colHeader; rowHeader]` restricts candidates to
//! cells whose column/row header text matches; omitting one header
//! scopes by the other axis alone. Multiple groups address nested
//! tables, checked innermost first.

use page_index::{ElementId, PageIndex};

use crate::config::FinderConfig;
use crate::errors::FinderError;
use crate::pattern::SearchPattern;
use crate::wpath::WPath;

/// True if the element sits inside cell(s) matching all coordinate
/// groups of the path.
pub(crate) fn element_in_coordinates(
    page: &PageIndex,
    element: ElementId,
    wpath: &WPath,
    config: &FinderConfig,
) -> Result<bool, FinderError> {
    let mut current = element;
    for coordinate in wpath.table_coordinates_reversed() {
        let Some(cell_element) = page.enclosing_cell(current) else {
            return Ok(false);
        };
        let Some(cell) = cell_element.cell else {
            return Ok(false);
        };

        if let Some(x) = coordinate.x() {
            let pattern = SearchPattern::compile(x.value(), config.wildcard, config.case.text)?;
            let header = page.column_header(&cell).unwrap_or_default();
            if header.is_empty() || pattern.surrounding_chars(header).is_none() {
                return Ok(false);
            }
        }
        if let Some(y) = coordinate.y() {
            let pattern = SearchPattern::compile(y.value(), config.wildcard, config.case.text)?;
            let header = page.row_header(&cell).unwrap_or_default();
            if header.is_empty() || pattern.surrounding_chars(header).is_none() {
                return Ok(false);
            }
        }

        // continue outward from the table for the next (outer) group
        current = page.table(&cell).element;
    }
    Ok(true)
}
