//! Path expressions naming a target control
//!
//! A path is an ordered list of criteria: zero or more preceding label
//! segments followed by exactly one target segment, or a table
//! coordinate form `[colHeader; rowHeader]` optionally followed by
//! further segments scoping within the selected cell.

use std::fmt;

use crate::config::FinderConfig;
use crate::errors::FinderError;
use crate::secret::SecretString;

/// The path token resolving to the page itself.
pub const PAGE_TOKEN: &str = "$PAGE";

/// One group of table coordinates, `[x; y]`.
///
/// `x` names a column header, `y` a row header; either may be omitted
/// but not both.
#[derive(Debug, Clone)]
pub struct TableCoordinate {
    x: Option<SecretString>,
    y: Option<SecretString>,
}

impl TableCoordinate {
    pub(crate) fn parse(segment: &SecretString) -> Result<Self, FinderError> {
        let raw = segment.value();
        let invalid = || FinderError::InvalidTableCoordinate(segment.to_string());
        let inner = raw
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .ok_or_else(invalid)?;

        let wrap = |part: &str| -> Option<SecretString> {
            let part = part.trim();
            if part.is_empty() {
                None
            } else if segment.is_confidential() {
                Some(SecretString::confidential(part))
            } else {
                Some(SecretString::new(part))
            }
        };

        if let Some((left, right)) = inner.split_once(';') {
            if right.contains(';') {
                return Err(invalid());
            }
            let coordinate = Self {
                x: wrap(left),
                y: wrap(right),
            };
            if coordinate.x.is_none() && coordinate.y.is_none() {
                return Err(invalid());
            }
            Ok(coordinate)
        } else {
            let x = wrap(inner).ok_or_else(invalid)?;
            Ok(Self { x: Some(x), y: None })
        }
    }

    /// The column header criterion.
    pub fn x(&self) -> Option<&SecretString> {
        self.x.as_ref()
    }

    /// The row header criterion.
    pub fn y(&self) -> Option<&SecretString> {
        self.y.as_ref()
    }
}

impl fmt::Display for TableCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{};{}]",
            self.x.as_ref().map(|s| s.to_string()).unwrap_or_default(),
            self.y.as_ref().map(|s| s.to_string()).unwrap_or_default()
        )
    }
}

/// A parsed path expression.
#[derive(Debug, Clone)]
pub struct WPath {
    raw: Vec<SecretString>,
    path_nodes: Vec<SecretString>,
    table_coordinates: Vec<TableCoordinate>,
    last_node: Option<SecretString>,
}

impl WPath {
    /// Parse a path from raw text using the configured separator.
    pub fn parse(text: &str, config: &FinderConfig) -> Result<Self, FinderError> {
        if text.trim().is_empty() {
            return Err(FinderError::EmptyPath);
        }
        let segments = text
            .split(config.separator)
            .map(|s| SecretString::new(s.trim()))
            .collect();
        Self::from_segments(segments)
    }

    /// Build a path from already-split segments (e.g. when criteria come
    /// from variables and carry confidential flags).
    pub fn from_segments(segments: Vec<SecretString>) -> Result<Self, FinderError> {
        if segments.is_empty() {
            return Err(FinderError::EmptyPath);
        }

        let mut path_nodes = Vec::new();
        let mut table_coordinates = Vec::new();
        let mut coordinates_finished = false;

        for segment in &segments[..segments.len() - 1] {
            if is_coordinate(segment.value()) {
                if coordinates_finished {
                    return Err(FinderError::MultipleCoordinateGroups);
                }
                table_coordinates.push(TableCoordinate::parse(segment)?);
            } else {
                if !table_coordinates.is_empty() {
                    coordinates_finished = true;
                }
                path_nodes.push(segment.clone());
            }
        }

        let last = &segments[segments.len() - 1];
        let last_node = if is_coordinate(last.value()) {
            if coordinates_finished {
                return Err(FinderError::MultipleCoordinateGroups);
            }
            table_coordinates.push(TableCoordinate::parse(last)?);
            None
        } else {
            Some(last.clone())
        };

        Ok(Self {
            raw: segments,
            path_nodes,
            table_coordinates,
            last_node,
        })
    }

    /// The segments as given.
    pub fn raw(&self) -> &[SecretString] {
        &self.raw
    }

    /// The preceding label segments.
    pub fn path_nodes(&self) -> &[SecretString] {
        &self.path_nodes
    }

    /// The table coordinate groups in path order.
    pub fn table_coordinates(&self) -> &[TableCoordinate] {
        &self.table_coordinates
    }

    /// The coordinate groups innermost first, the order in which cell
    /// membership is checked.
    pub fn table_coordinates_reversed(&self) -> impl Iterator<Item = &TableCoordinate> {
        self.table_coordinates.iter().rev()
    }

    /// The final target segment; `None` when the path ends in a
    /// coordinate group.
    pub fn last_node(&self) -> Option<&SecretString> {
        self.last_node.as_ref()
    }

    /// True for the literal `$PAGE` path.
    pub fn is_page_path(&self) -> bool {
        self.path_nodes.is_empty()
            && self.table_coordinates.is_empty()
            && self
                .last_node
                .as_ref()
                .is_some_and(|n| n.value() == PAGE_TOKEN)
    }
}

impl fmt::Display for WPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.raw.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

fn is_coordinate(value: &str) -> bool {
    value.starts_with('[') && value.ends_with(']') && !value.ends_with("\\]")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<WPath, FinderError> {
        WPath::parse(text, &FinderConfig::default())
    }

    #[test]
    fn single_segment() {
        let path = parse("myId").expect("parses");
        assert!(path.path_nodes().is_empty());
        assert_eq!(path.last_node().map(|n| n.value()), Some("myId"));
    }

    #[test]
    fn labels_then_target() {
        let path = parse("Section > Name > Submit").expect("parses");
        let nodes: Vec<_> = path.path_nodes().iter().map(|n| n.value()).collect();
        assert_eq!(nodes, ["Section", "Name"]);
        assert_eq!(path.last_node().map(|n| n.value()), Some("Submit"));
    }

    #[test]
    fn coordinates_with_trailing_target() {
        let path = parse("[Col; Row] > target").expect("parses");
        assert_eq!(path.table_coordinates().len(), 1);
        let coordinate = &path.table_coordinates()[0];
        assert_eq!(coordinate.x().map(|s| s.value()), Some("Col"));
        assert_eq!(coordinate.y().map(|s| s.value()), Some("Row"));
        assert_eq!(path.last_node().map(|n| n.value()), Some("target"));
    }

    #[test]
    fn coordinate_only_path_has_no_last_node() {
        let path = parse("[;Row]").expect("parses");
        assert!(path.last_node().is_none());
        let coordinate = &path.table_coordinates()[0];
        assert!(coordinate.x().is_none());
        assert_eq!(coordinate.y().map(|s| s.value()), Some("Row"));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(parse("   "), Err(FinderError::EmptyPath)));
    }

    #[test]
    fn empty_coordinate_is_rejected() {
        assert!(matches!(
            parse("[]"),
            Err(FinderError::InvalidTableCoordinate(_))
        ));
        assert!(matches!(
            parse("[;]"),
            Err(FinderError::InvalidTableCoordinate(_))
        ));
        assert!(matches!(
            parse("[a;b;c]"),
            Err(FinderError::InvalidTableCoordinate(_))
        ));
    }

    #[test]
    fn split_coordinate_groups_are_rejected() {
        assert_eq!(
            parse("[a] > text > [b]").unwrap_err(),
            FinderError::MultipleCoordinateGroups
        );
    }

    #[test]
    fn page_token() {
        assert!(parse("$PAGE").expect("parses").is_page_path());
        assert!(!parse("x > $PAGE").expect("parses").is_page_path());
    }

    #[test]
    fn display_masks_confidential_segments() {
        let path = WPath::from_segments(vec![
            SecretString::new("User"),
            SecretString::confidential("s3cret"),
        ])
        .expect("parses");
        assert_eq!(path.to_string(), "User > ****");
    }
}
