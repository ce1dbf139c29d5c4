//! Document-order assembly of page snapshots
//!
//! The page provider walks its element tree depth-first and feeds the
//! builder with `open` / `attr` / `text` / `close` calls. The builder
//! computes everything the identification engine later queries: the
//! linearized page text, per-element text spots, parent links, effective
//! visibility and table grids.

use std::collections::BTreeMap;

use crate::element::{CellRef, ControlFamily, ElementId, FindSpot, MouseAction, PageElement};
use crate::index::{PageIndex, TableGrid};

const PENDING: usize = usize::MAX;

struct OpenEntry {
    index: usize,
    hides: bool,
}

struct TableState {
    ordinal: usize,
    current_row: Option<usize>,
    next_row: usize,
    next_col: usize,
}

/// Builder for [`PageIndex`] snapshots.
pub struct PageIndexBuilder {
    elements: Vec<PageElement>,
    text: String,
    tables: Vec<TableGrid>,
    open: Vec<OpenEntry>,
    table_stack: Vec<TableState>,
    hidden_depth: usize,
}

impl Default for PageIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageIndexBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            text: String::new(),
            tables: Vec::new(),
            open: Vec::new(),
            table_stack: Vec::new(),
            hidden_depth: 0,
        }
    }

    /// Open a new element as child of the currently open one.
    pub fn open(&mut self, tag: &str, family: ControlFamily) -> &mut Self {
        let id = ElementId(self.elements.len());
        let parent = self.open.last().map(|e| ElementId(e.index));
        let cell = self.enter_table_structures(family);

        self.elements.push(PageElement {
            id,
            tag: tag.to_string(),
            family,
            attributes: BTreeMap::new(),
            visible: self.hidden_depth == 0,
            parent,
            spot: FindSpot::new(PENDING, PENDING),
            listeners: Vec::new(),
            cell,
        });
        self.open.push(OpenEntry {
            index: id.0,
            hides: false,
        });
        self
    }

    /// Set an attribute on the currently open element.
    pub fn attr(&mut self, name: &str, value: &str) -> &mut Self {
        if let Some(entry) = self.open.last() {
            self.elements[entry.index]
                .attributes
                .insert(name.to_string(), value.to_string());
        }
        self
    }

    /// Register a mouse listener on the currently open element.
    pub fn listener(&mut self, action: MouseAction) -> &mut Self {
        if let Some(entry) = self.open.last() {
            self.elements[entry.index].listeners.push(action);
        }
        self
    }

    /// Mark the currently open element (and thereby its subtree) as not
    /// displayed. Must be called before any children are opened.
    pub fn hidden(&mut self) -> &mut Self {
        if let Some(entry) = self.open.last_mut() {
            if !entry.hides {
                entry.hides = true;
                self.hidden_depth += 1;
            }
            let index = entry.index;
            self.elements[index].visible = false;
        }
        self
    }

    /// Append a text chunk inside the currently open element.
    ///
    /// The chunk is whitespace normalized; text inside hidden subtrees
    /// does not take part in the reading flow.
    pub fn text(&mut self, chunk: &str) -> &mut Self {
        if self.hidden_depth > 0 {
            return self;
        }
        let normalized = normalize(chunk);
        if normalized.is_empty() {
            return self;
        }
        self.append_flow_text(&normalized);
        self
    }

    /// Close the currently open element.
    pub fn close(&mut self) -> &mut Self {
        let Some(entry) = self.open.last() else {
            return self;
        };
        let index = entry.index;

        // buttons without own text render their value attribute
        if self.elements[index].spot.start == PENDING
            && self.elements[index].visible
            && matches!(
                self.elements[index].family,
                ControlFamily::Button | ControlFamily::ImageButton
            )
        {
            let caption = self.elements[index].attributes.get("value").map(|v| normalize(v));
            if let Some(caption) = caption.filter(|c| !c.is_empty()) {
                self.append_flow_text(&caption);
            }
        }

        let entry = self.open.pop().expect("checked above");
        if entry.hides {
            self.hidden_depth -= 1;
        }
        let element = &mut self.elements[entry.index];
        if element.spot.start == PENDING {
            element.spot = FindSpot::at(self.text.len());
        } else {
            element.spot.end = self.text.len();
        }
        let family = element.family;
        self.leave_table_structures(family);
        self
    }

    /// Open and immediately close a childless element with attributes.
    pub fn control(&mut self, tag: &str, family: ControlFamily, attrs: &[(&str, &str)]) -> &mut Self {
        self.open(tag, family);
        for (name, value) in attrs {
            self.attr(name, value);
        }
        self.close()
    }

    /// Finish the snapshot. Still-open elements are closed implicitly.
    pub fn build(mut self) -> PageIndex {
        while !self.open.is_empty() {
            self.close();
        }
        self.fill_table_headers();
        PageIndex::new(self.elements, self.text, self.tables)
    }

    fn append_flow_text(&mut self, normalized: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        let pos = self.text.len();
        self.text.push_str(normalized);
        for entry in &self.open {
            let element = &mut self.elements[entry.index];
            if element.spot.start == PENDING {
                element.spot.start = pos;
            }
        }
    }

    fn enter_table_structures(&mut self, family: ControlFamily) -> Option<CellRef> {
        match family {
            ControlFamily::Table => {
                let ordinal = self.tables.len();
                self.tables.push(TableGrid {
                    element: ElementId(self.elements.len()),
                    column_headers: Vec::new(),
                    row_headers: Vec::new(),
                });
                self.table_stack.push(TableState {
                    ordinal,
                    current_row: None,
                    next_row: 0,
                    next_col: 0,
                });
                None
            }
            ControlFamily::TableRow => {
                if let Some(state) = self.table_stack.last_mut() {
                    state.current_row = Some(state.next_row);
                    state.next_row += 1;
                    state.next_col = 0;
                }
                None
            }
            ControlFamily::TableCell => self.table_stack.last_mut().and_then(|state| {
                let row = state.current_row?;
                let column = state.next_col;
                state.next_col += 1;
                Some(CellRef {
                    table: state.ordinal,
                    row,
                    column,
                })
            }),
            _ => None,
        }
    }

    fn leave_table_structures(&mut self, family: ControlFamily) {
        if family == ControlFamily::Table {
            self.table_stack.pop();
        }
    }

    fn fill_table_headers(&mut self) {
        for element in &self.elements {
            let Some(cell) = element.cell else { continue };
            let text = self.text[element.spot.start..element.spot.end]
                .trim()
                .to_string();
            let grid = &mut self.tables[cell.table];
            if cell.row == 0 {
                grow_to(&mut grid.column_headers, cell.column);
                grid.column_headers[cell.column] = text.clone();
            }
            if cell.column == 0 {
                grow_to(&mut grid.row_headers, cell.row);
                grid.row_headers[cell.row] = text;
            }
        }
    }
}

fn grow_to(headers: &mut Vec<String>, index: usize) {
    while headers.len() <= index {
        headers.push(String::new());
    }
}

fn normalize(chunk: &str) -> String {
    chunk.split_whitespace().collect::<Vec<_>>().join(" ")
}
