//! Element model of a page snapshot

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle of an element inside a [`crate::PageIndex`].
///
/// The value is the document index of the element, so comparing ids
/// compares document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A half-open character range inside the linearized page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindSpot {
    /// Start position, inclusive.
    pub start: usize,
    /// End position, exclusive.
    pub end: usize,
}

impl FindSpot {
    /// Create a new spot.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty spot at the given position.
    pub fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Number of characters covered by the spot.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the spot covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for FindSpot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Control family classification of an element.
///
/// The family is assigned by the page provider while indexing; the
/// identification engine never inspects raw markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlFamily {
    /// `<a>`
    Anchor,
    /// `<button>`, `<input type="button|submit|reset">`
    Button,
    /// `<input type="checkbox">`
    Checkbox,
    /// `<input type="radio">`
    RadioButton,
    /// `<select>`
    Select,
    /// `<option>` inside a select
    OptionInSelect,
    /// `<img>`
    Image,
    /// `<input type="image">`
    ImageButton,
    /// `<input type="text|email|url|...">`
    InputText,
    /// `<input type="password">`
    InputPassword,
    /// `<input type="file">`
    InputFile,
    /// `<textarea>`
    TextArea,
    /// `<label>`
    Label,
    /// `<table>`
    Table,
    /// `<tr>`
    TableRow,
    /// `<td>` / `<th>`
    TableCell,
    /// Anything the provider does not classify as a control.
    Unknown,
}

impl ControlFamily {
    /// Family name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ControlFamily::Anchor => "anchor",
            ControlFamily::Button => "button",
            ControlFamily::Checkbox => "checkbox",
            ControlFamily::RadioButton => "radio-button",
            ControlFamily::Select => "select",
            ControlFamily::OptionInSelect => "option",
            ControlFamily::Image => "image",
            ControlFamily::ImageButton => "image-button",
            ControlFamily::InputText => "input-text",
            ControlFamily::InputPassword => "input-password",
            ControlFamily::InputFile => "input-file",
            ControlFamily::TextArea => "textarea",
            ControlFamily::Label => "label",
            ControlFamily::Table => "table",
            ControlFamily::TableRow => "table-row",
            ControlFamily::TableCell => "table-cell",
            ControlFamily::Unknown => "unknown",
        }
    }

    /// True for interactive form controls.
    ///
    /// Used when computing the labeling text before an element: the text
    /// chunk starts after the previous form control.
    pub fn is_form_control(&self) -> bool {
        matches!(
            self,
            ControlFamily::Button
                | ControlFamily::Checkbox
                | ControlFamily::RadioButton
                | ControlFamily::Select
                | ControlFamily::OptionInSelect
                | ControlFamily::ImageButton
                | ControlFamily::InputText
                | ControlFamily::InputPassword
                | ControlFamily::InputFile
                | ControlFamily::TextArea
        )
    }
}

/// A mouse action an element may listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseAction {
    /// Single left click.
    Click,
    /// Double left click.
    ClickDouble,
    /// Right click / context menu.
    ClickRight,
    /// Hover.
    MouseOver,
}

impl MouseAction {
    /// Action name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            MouseAction::Click => "click",
            MouseAction::ClickDouble => "click-double",
            MouseAction::ClickRight => "click-right",
            MouseAction::MouseOver => "mouse-over",
        }
    }
}

/// Position of a cell inside a table grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef {
    /// Ordinal of the table inside the snapshot.
    pub table: usize,
    /// Row index, 0-based.
    pub row: usize,
    /// Column index, 0-based.
    pub column: usize,
}

/// One element of the page snapshot.
///
/// Owned by the page provider; the identification engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageElement {
    /// Element handle, equal to the document index.
    pub id: ElementId,

    /// Lowercase tag name.
    pub tag: String,

    /// Control family classification.
    pub family: ControlFamily,

    /// Attribute map (id, name, title, alt, aria-label, value, for, src, ...).
    pub attributes: BTreeMap<String, String>,

    /// Effective visibility (own style and inherited).
    pub visible: bool,

    /// Parent element, `None` for top-level elements.
    pub parent: Option<ElementId>,

    /// Position of the element's text in the linearized page text.
    pub spot: FindSpot,

    /// Mouse actions the element listens for.
    pub listeners: Vec<MouseAction>,

    /// Cell position if the element is a table cell.
    pub cell: Option<CellRef>,
}

impl PageElement {
    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The html `id` attribute, if not empty.
    pub fn html_id(&self) -> Option<&str> {
        self.attribute("id").filter(|v| !v.is_empty())
    }

    /// The `name` attribute, if not empty.
    pub fn name_attribute(&self) -> Option<&str> {
        self.attribute("name").filter(|v| !v.is_empty())
    }

    /// True if the element listens for the given mouse action.
    pub fn has_listener(&self, action: MouseAction) -> bool {
        self.listeners.contains(&action)
    }
}
