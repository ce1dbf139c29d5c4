//! Immutable page snapshot and its query surface

use crate::element::{CellRef, ControlFamily, ElementId, FindSpot, MouseAction, PageElement};

/// Header texts of one table in the snapshot.
///
/// Column headers are taken from the first row, row headers from the
/// first cell of each row.
#[derive(Debug, Clone)]
pub struct TableGrid {
    /// The `<table>` element.
    pub element: ElementId,
    /// Text of the header cell per column.
    pub column_headers: Vec<String>,
    /// Text of the first cell per row.
    pub row_headers: Vec<String>,
}

/// Immutable snapshot of a rendered page.
///
/// Built once per page state by the page provider (see
/// [`crate::PageIndexBuilder`]) and shared read-only across identification
/// requests. Element ids handed out by one snapshot must never be used
/// against another; snapshot consistency is a caller precondition.
#[derive(Debug, Clone)]
pub struct PageIndex {
    elements: Vec<PageElement>,
    text: String,
    tables: Vec<TableGrid>,
}

impl PageIndex {
    pub(crate) fn new(elements: Vec<PageElement>, text: String, tables: Vec<TableGrid>) -> Self {
        Self {
            elements,
            text,
            tables,
        }
    }

    /// The whole page text in reading order, whitespace normalized.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of elements in the snapshot.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True if the snapshot contains no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Look up an element by id.
    ///
    /// Panics if the id does not belong to this snapshot; stale handles
    /// violate the snapshot precondition.
    pub fn element(&self, id: ElementId) -> &PageElement {
        &self.elements[id.0]
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &PageElement> {
        self.elements.iter()
    }

    /// All effectively visible elements in document order.
    pub fn visible_elements(&self) -> impl Iterator<Item = &PageElement> {
        self.elements.iter().filter(|e| e.visible)
    }

    /// Position of an element's text in the page text.
    pub fn position(&self, id: ElementId) -> FindSpot {
        self.element(id).spot
    }

    /// The element's own (inner) text.
    pub fn inner_text(&self, id: ElementId) -> &str {
        let spot = self.position(id);
        &self.text[spot.start..spot.end]
    }

    /// All text before the element in reading order.
    pub fn text_before(&self, id: ElementId) -> &str {
        let spot = self.position(id);
        &self.text[..spot.start]
    }

    /// The labeling text directly before the element.
    ///
    /// This is the text between the previous form control (or `after`,
    /// whichever comes later) and the element itself.
    pub fn labeling_text_before(&self, id: ElementId, after: usize) -> &str {
        let spot = self.position(id);
        let mut chunk_start = after.min(spot.start);
        for other in &self.elements {
            if other.id == id || !other.family.is_form_control() {
                continue;
            }
            if other.spot.end <= spot.start && other.spot.end > chunk_start {
                // skip enclosing controls, their spot ends where ours does
                if !self.is_ancestor(other.id, id) {
                    chunk_start = other.spot.end;
                }
            }
        }
        self.text[chunk_start..spot.start].trim()
    }

    /// A label's text with the text of nested form controls removed.
    pub fn text_without_form_controls(&self, id: ElementId) -> String {
        let spot = self.position(id);
        let mut masked: Vec<FindSpot> = Vec::new();
        for other in &self.elements {
            if other.family.is_form_control() && self.is_ancestor(id, other.id) {
                masked.push(other.spot);
            }
        }
        masked.sort_by_key(|s| s.start);

        let mut result = String::new();
        let mut pos = spot.start;
        for m in masked {
            if m.start > pos {
                result.push_str(&self.text[pos..m.start]);
            }
            pos = pos.max(m.end);
        }
        if spot.end > pos {
            result.push_str(&self.text[pos..spot.end]);
        }
        result.trim().to_string()
    }

    /// Find the element carrying the given html `id` attribute.
    pub fn element_by_html_id(&self, html_id: &str) -> Option<&PageElement> {
        self.elements.iter().find(|e| e.html_id() == Some(html_id))
    }

    /// All visible labels whose `for` attribute points at the given html id.
    pub fn labels_for<'a>(&'a self, html_id: &'a str) -> impl Iterator<Item = &'a PageElement> {
        self.elements.iter().filter(move |e| {
            e.family == ControlFamily::Label && e.visible && e.attribute("for") == Some(html_id)
        })
    }

    /// The nearest ancestor label of an element, if any.
    pub fn ancestor_label(&self, id: ElementId) -> Option<&PageElement> {
        self.ancestors(id)
            .find(|e| e.family == ControlFamily::Label)
    }

    /// Ancestors of an element, nearest first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = &PageElement> {
        let mut current = self.element(id).parent;
        std::iter::from_fn(move || {
            let parent = self.element(current?);
            current = parent.parent;
            Some(parent)
        })
    }

    /// True if `ancestor` is on the parent chain of `child`.
    pub fn is_ancestor(&self, ancestor: ElementId, child: ElementId) -> bool {
        self.ancestors(child).any(|e| e.id == ancestor)
    }

    /// Descendants of an element in document order.
    pub fn descendants(&self, id: ElementId) -> impl Iterator<Item = &PageElement> {
        self.elements
            .iter()
            .filter(move |e| self.is_ancestor(id, e.id))
    }

    /// The nearest enclosing table cell of an element (the element itself
    /// if it is a cell).
    pub fn enclosing_cell(&self, id: ElementId) -> Option<&PageElement> {
        let element = self.element(id);
        if element.family == ControlFamily::TableCell {
            return Some(element);
        }
        self.ancestors(id)
            .find(|e| e.family == ControlFamily::TableCell)
    }

    /// The table grid a cell belongs to.
    pub fn table(&self, cell: &CellRef) -> &TableGrid {
        &self.tables[cell.table]
    }

    /// Header text of the cell's column.
    pub fn column_header(&self, cell: &CellRef) -> Option<&str> {
        self.tables[cell.table]
            .column_headers
            .get(cell.column)
            .map(String::as_str)
    }

    /// Header text of the cell's row.
    pub fn row_header(&self, cell: &CellRef) -> Option<&str> {
        self.tables[cell.table]
            .row_headers
            .get(cell.row)
            .map(String::as_str)
    }

    /// True if the element listens for the given mouse action.
    pub fn has_listener(&self, id: ElementId, action: MouseAction) -> bool {
        self.element(id).has_listener(action)
    }

    /// A short describing text for diagnostics and logs.
    ///
    /// A control without own text wrapping exactly one image is reported
    /// by that image's source.
    pub fn describing_text(&self, id: ElementId) -> String {
        let element = self.element(id);
        let own_text = self.inner_text(id).trim();
        if own_text.is_empty() {
            let mut images = self
                .descendants(id)
                .filter(|e| e.family == ControlFamily::Image);
            if let (Some(image), None) = (images.next(), images.next()) {
                if let Some(src) = image.attribute("src") {
                    return format!("[{} 'image: {}']", element.tag, src);
                }
            }
            if let Some(html_id) = element.html_id() {
                return format!("[{} (id={})]", element.tag, html_id);
            }
            return format!("[{}]", element.tag);
        }
        format!("[{} '{}']", element.tag, own_text)
    }
}
