//! End-to-end identification scenarios against built snapshots.

use control_finder::{
    clickable_set, mouse_action_set, selectable_set, settable_set, Entry, EntryTarget, Finder,
    FoundBy, WeightedControlList,
};
use page_index::{ControlFamily, ElementId, MouseAction, PageIndex, PageIndexBuilder};

fn resolve(page: &PageIndex, path: &str, kinds: &[control_finder::IdentifierKind]) -> Vec<Entry> {
    Finder::default()
        .identify(path, page, kinds, None)
        .expect("path resolves")
        .entries_sorted()
}

fn anchor_page() -> PageIndex {
    let mut builder = PageIndexBuilder::new();
    builder.open("a", ControlFamily::Anchor);
    builder.attr("id", "myId");
    builder.attr("href", "snoopy.php");
    builder.text("TestAnchor");
    builder.close();
    builder.build()
}

#[test]
fn anchor_by_exact_id() {
    let page = anchor_page();
    let entries = resolve(&page, "myId", clickable_set());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_by, FoundBy::ById);
    assert_eq!(entries[0].deviation, 0);
    assert_eq!(entries[0].distance, 0);
}

#[test]
fn id_substring_does_not_match() {
    let page = anchor_page();
    assert!(resolve(&page, "yI", clickable_set()).is_empty());
}

#[test]
fn marker_text_disambiguates_identical_buttons() {
    let mut builder = PageIndexBuilder::new();
    builder.control("input", ControlFamily::Button, &[("id", "myId")]);
    builder.open("p", ControlFamily::Unknown);
    builder.text("Marker");
    builder.close();
    builder.control("input", ControlFamily::Button, &[("id", "myId")]);
    let page = builder.build();

    let entries = resolve(&page, "Marker > myId", clickable_set());
    // the button before the marker cannot satisfy the chain
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].element(), Some(ElementId(2)));
    assert_eq!(entries[0].found_by, FoundBy::ById);
    assert_eq!(entries[0].distance, 0);
}

#[test]
fn image_by_source_basename() {
    let mut builder = PageIndexBuilder::new();
    builder.control(
        "input",
        ControlFamily::ImageButton,
        &[("alt", "MyAlt"), ("src", "web/picture.png")],
    );
    let page = builder.build();

    let entries = resolve(&page, "picture.png", clickable_set());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_by, FoundBy::ByImgSrcAttribute);
    // the stripped "web/" prefix counts against the match
    assert_eq!(entries[0].deviation, 4);
}

#[test]
fn option_matches_instead_of_its_select() {
    let mut builder = PageIndexBuilder::new();
    builder.open("select", ControlFamily::Select);
    builder.open("option", ControlFamily::OptionInSelect);
    builder.attr("value", "o_value1");
    builder.text("option1");
    builder.close();
    builder.close();
    let page = builder.build();

    let entries = resolve(&page, "option1", selectable_set());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_by, FoundBy::ByLabel);
    assert_eq!(entries[0].deviation, 0);
    assert_eq!(entries[0].distance, 0);
    let option = entries[0].element().expect("element");
    assert_eq!(page.element(option).family, ControlFamily::OptionInSelect);
}

#[test]
fn text_input_by_labeling_text() {
    let mut builder = PageIndexBuilder::new();
    builder.open("span", ControlFamily::Unknown);
    builder.text("First name");
    builder.close();
    builder.control("input", ControlFamily::InputText, &[("name", "fn")]);
    builder.open("span", ControlFamily::Unknown);
    builder.text("Last name");
    builder.close();
    builder.control("input", ControlFamily::InputText, &[("name", "ln")]);
    let page = builder.build();

    let entries = resolve(&page, "Last name", settable_set());
    let inputs: Vec<_> = entries
        .iter()
        .filter(|e| {
            e.element()
                .is_some_and(|id| page.element(id).family == ControlFamily::InputText)
        })
        .collect();
    // only the input behind "Last name" qualifies, never the one behind
    // "First name"
    assert_eq!(inputs.len(), 1);
    let best = page.element(inputs[0].element().expect("element"));
    assert_eq!(best.name_attribute(), Some("ln"));
}

#[test]
fn preceding_label_prefers_the_nearer_candidate() {
    let mut builder = PageIndexBuilder::new();
    for (section, name) in [("Billing", "b_zip"), ("Shipping", "s_zip")] {
        builder.open("h2", ControlFamily::Unknown);
        builder.text(section);
        builder.close();
        builder.open("span", ControlFamily::Unknown);
        builder.text("Zip");
        builder.close();
        builder.control("input", ControlFamily::InputText, &[("name", name)]);
    }
    let page = builder.build();

    let entries = resolve(&page, "Shipping > Zip", settable_set());
    let inputs: Vec<_> = entries
        .iter()
        .filter(|e| {
            e.element()
                .is_some_and(|id| page.element(id).family == ControlFamily::InputText)
        })
        .collect();
    // the billing field sits before "Shipping" and is rejected outright
    assert_eq!(inputs.len(), 1);
    let best = page.element(inputs[0].element().expect("element"));
    assert_eq!(best.name_attribute(), Some("s_zip"));
}

#[test]
fn table_coordinates_scope_the_match() {
    let mut builder = PageIndexBuilder::new();
    builder.open("table", ControlFamily::Table);
    for (row_header, names) in [("", &["", ""]), ("Row1", &["a", "b"]), ("Row2", &["c", "d"])] {
        builder.open("tr", ControlFamily::TableRow);
        builder.open("td", ControlFamily::TableCell);
        if !row_header.is_empty() {
            builder.text(row_header);
        }
        builder.close();
        for (column, name) in names.iter().enumerate() {
            builder.open("td", ControlFamily::TableCell);
            if row_header.is_empty() {
                builder.text(&format!("Col{}", column + 1));
            } else {
                builder.control("input", ControlFamily::InputText, &[("name", *name)]);
            }
            builder.close();
        }
        builder.close();
    }
    builder.close();
    let page = builder.build();

    let entries = resolve(&page, "[Col2; Row2]", settable_set());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_by, FoundBy::ByTableCoordinate);
    let best = page.element(entries[0].element().expect("element"));
    assert_eq!(best.name_attribute(), Some("d"));
}

#[test]
fn hidden_controls_are_invisible_to_identification() {
    let mut builder = PageIndexBuilder::new();
    builder.open("a", ControlFamily::Anchor);
    builder.hidden();
    builder.attr("id", "hiddenLink");
    builder.text("Hidden");
    builder.close();
    builder.open("a", ControlFamily::Anchor);
    builder.attr("id", "shownLink");
    builder.text("Shown");
    builder.close();
    let page = builder.build();

    assert!(resolve(&page, "hiddenLink", clickable_set()).is_empty());
    assert_eq!(resolve(&page, "shownLink", clickable_set()).len(), 1);
}

#[test]
fn page_token_bypasses_all_identifiers() {
    let page = anchor_page();
    let entries = resolve(&page, "$PAGE", clickable_set());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].target, EntryTarget::Page);
    assert_eq!(entries[0].found_by, FoundBy::ByPage);
}

#[test]
fn resolution_is_deterministic() {
    let mut builder = PageIndexBuilder::new();
    for i in 0..4 {
        builder.open("a", ControlFamily::Anchor);
        builder.attr("href", &format!("/{i}"));
        builder.text("Details");
        builder.close();
    }
    let page = builder.build();

    let first = resolve(&page, "Details", clickable_set());
    assert_eq!(first.len(), 4);
    for _ in 0..5 {
        assert_eq!(resolve(&page, "Details", clickable_set()), first);
    }
    // identical scores fall back to document order
    let ids: Vec<_> = first.iter().map(|e| e.element().expect("element")).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn union_of_identifier_results_ranks_across_kinds() {
    let mut builder = PageIndexBuilder::new();
    builder.open("a", ControlFamily::Anchor);
    builder.text("Search");
    builder.close();
    builder.open("button", ControlFamily::Button);
    builder.text("Search now");
    builder.close();
    let page = builder.build();

    let entries = resolve(&page, "Search", clickable_set());
    assert_eq!(entries.len(), 2);
    // the exact anchor text outranks the partial button caption
    assert_eq!(entries[0].found_by, FoundBy::ByText);
    assert_eq!(entries[0].deviation, 0);
    assert_eq!(entries[1].found_by, FoundBy::ByLabelText);
    assert_eq!(entries[1].deviation, 4);
}

#[test]
fn wildcard_paths_match_with_slack() {
    let mut builder = PageIndexBuilder::new();
    builder.open("a", ControlFamily::Anchor);
    builder.text("Download manual");
    builder.close();
    let page = builder.build();

    let entries = resolve(&page, "Down*manual", clickable_set());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_by, FoundBy::ByText);
    // the wildcard consumed "load "
    assert_eq!(entries[0].deviation, 5);
}

#[test]
fn clickable_set_reaches_listening_plain_markup() {
    let mut builder = PageIndexBuilder::new();
    builder.open("span", ControlFamily::Unknown);
    builder.listener(MouseAction::Click);
    builder.text("Expand");
    builder.close();
    let page = builder.build();

    // no click-family kind covers a span; the fallback has to
    let list = Finder::default()
        .identify("Expand", &page, clickable_set(), Some(MouseAction::Click))
        .expect("resolves");
    assert_eq!(list.len(), 1);
    assert_eq!(list.entries()[0].found_by, FoundBy::ByText);
}

#[test]
fn mouse_action_requires_a_listener_on_plain_markup() {
    let mut builder = PageIndexBuilder::new();
    builder.open("div", ControlFamily::Unknown);
    builder.attr("id", "menu");
    builder.listener(MouseAction::MouseOver);
    builder.text("Products");
    builder.close();
    let page = builder.build();
    let finder = Finder::default();

    let over: WeightedControlList = finder
        .identify("menu", &page, mouse_action_set(), Some(MouseAction::MouseOver))
        .expect("resolves");
    assert_eq!(over.len(), 1);
    let click = finder
        .identify("menu", &page, mouse_action_set(), Some(MouseAction::Click))
        .expect("resolves");
    assert!(click.is_empty());
}
