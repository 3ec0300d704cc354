//! The editable bang table
//!
//! [`BangTable`] owns the rows shown below the fixed header. It can be rebuilt
//! from a [`BangMapping`] and can derive a mapping back from whatever the user
//! has typed, dropping rows that are incomplete.

use crate::error::{Error, Result};
use crate::mapping::BangMapping;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Column labels of the fixed header row
pub const HEADER: [&str; 2] = ["Bang", "URL"];

/// Session-unique identifier of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(u64);

impl RowId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a row carries enough to be saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowValidity {
    /// Shortcut or URL is blank; flagged in the UI and dropped on save
    Empty,
    /// Both fields carry text
    Filled,
}

/// One of the two editable cells of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Shortcut,
    Url,
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bang" | "shortcut" => Ok(Field::Shortcut),
            "url" => Ok(Field::Url),
            other => Err(format!("unknown field '{}', expected 'bang' or 'url'", other)),
        }
    }
}

/// Check whether a single cell is blank
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Classify a row from its two cells
///
/// Used both to flag a row while it is edited and to filter rows on save.
pub fn classify_row(shortcut: &str, url: &str) -> RowValidity {
    if is_blank(shortcut) || is_blank(url) {
        RowValidity::Empty
    } else {
        RowValidity::Filled
    }
}

/// A row of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BangRow {
    /// Row identifier
    pub id: RowId,
    /// Shortcut text as typed
    pub shortcut: String,
    /// URL template text as typed
    pub url: String,
}

impl BangRow {
    /// Get the validity of this row
    pub fn validity(&self) -> RowValidity {
        classify_row(&self.shortcut, &self.url)
    }

    pub fn is_filled(&self) -> bool {
        self.validity() == RowValidity::Filled
    }

    /// Get the text of one cell
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Shortcut => &self.shortcut,
            Field::Url => &self.url,
        }
    }
}

/// Result of deriving a mapping from the table
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Mapping built from the complete rows
    pub mapping: BangMapping,
    /// Incomplete rows that were removed from the table
    pub discarded: Vec<BangRow>,
}

/// The rows of the bang table, in display order
#[derive(Debug, Default)]
pub struct BangTable {
    rows: Vec<BangRow>,
    next_id: u64,
}

impl BangTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get all rows in display order
    pub fn rows(&self) -> &[BangRow] {
        &self.rows
    }

    /// Find a row by ID
    pub fn find_row(&self, id: RowId) -> Option<&BangRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Get the row at a display position (0-based)
    pub fn row_at(&self, index: usize) -> Option<&BangRow> {
        self.rows.get(index)
    }

    /// Replace every row with one row per mapping entry
    pub fn render(&mut self, mapping: &BangMapping) -> &[BangRow] {
        self.rows.clear();
        for (shortcut, url) in mapping.iter() {
            self.push_row(shortcut, url);
        }
        debug!(rows = self.rows.len(), "Rendered bang table");
        &self.rows
    }

    /// Append a new row and return a reference to it
    pub fn add_row(&mut self, shortcut: impl Into<String>, url: impl Into<String>) -> &BangRow {
        let index = self.push_row(shortcut, url);
        &self.rows[index]
    }

    /// Replace the text of one cell, returning the updated row
    pub fn edit_row(&mut self, id: RowId, field: Field, text: impl Into<String>) -> Result<&BangRow> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Error::RowNotFound(id))?;

        match field {
            Field::Shortcut => row.shortcut = text.into(),
            Field::Url => row.url = text.into(),
        }
        Ok(&*row)
    }

    /// Remove a row, returning it
    pub fn delete_row(&mut self, id: RowId) -> Result<BangRow> {
        let index = self
            .rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::RowNotFound(id))?;
        Ok(self.rows.remove(index))
    }

    /// Derive a mapping from the table, removing incomplete rows
    ///
    /// Both cells are trimmed. Rows where either cell is blank are taken out
    /// of the table and reported in [`Extraction::discarded`]. Later rows win
    /// over earlier rows with the same shortcut.
    ///
    /// Rendering a mapping and extracting it again is therefore not an
    /// identity for every mapping: padded shortcuts or URLs come back trimmed,
    /// and entries with an empty shortcut or URL are dropped.
    pub fn extract_mapping(&mut self) -> Extraction {
        let mut extraction = Extraction::default();
        let mut kept = Vec::with_capacity(self.rows.len());

        for row in self.rows.drain(..) {
            match row.validity() {
                RowValidity::Filled => {
                    extraction
                        .mapping
                        .insert(row.shortcut.trim(), row.url.trim());
                    kept.push(row);
                }
                RowValidity::Empty => extraction.discarded.push(row),
            }
        }

        self.rows = kept;
        debug!(
            kept = extraction.mapping.len(),
            discarded = extraction.discarded.len(),
            "Extracted mapping from bang table"
        );
        extraction
    }

    fn push_row(&mut self, shortcut: impl Into<String>, url: impl Into<String>) -> usize {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(BangRow {
            id,
            shortcut: shortcut.into(),
            url: url.into(),
        });
        self.rows.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BangMapping {
        [
            ("d", "https://duckduckgo.com?q=%s"),
            ("g", "https://google.com?q=%s"),
            ("w", "https://en.wikipedia.org/w/index.php?search=%s"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_classify_row() {
        assert_eq!(classify_row("g", "https://google.com?q=%s"), RowValidity::Filled);
        assert_eq!(classify_row("", "https://google.com?q=%s"), RowValidity::Empty);
        assert_eq!(classify_row("g", ""), RowValidity::Empty);
        assert_eq!(classify_row("  ", "x"), RowValidity::Empty);
        assert_eq!(classify_row(" g ", " x "), RowValidity::Filled);
    }

    #[test]
    fn test_render_follows_mapping_order() {
        let mut table = BangTable::new();
        let rows = table.render(&sample());

        let shortcuts: Vec<&str> = rows.iter().map(|r| r.shortcut.as_str()).collect();
        assert_eq!(shortcuts, vec!["d", "g", "w"]);
    }

    #[test]
    fn test_render_replaces_existing_rows() {
        let mut table = BangTable::new();
        table.add_row("x", "https://example.com?q=%s");
        table.add_row("y", "https://example.org?q=%s");

        table.render(&sample());

        assert_eq!(table.row_count(), 3);
        assert!(table.rows().iter().all(|r| r.shortcut != "x" && r.shortcut != "y"));
    }

    #[test]
    fn test_round_trip_without_edits() {
        let mut table = BangTable::new();
        table.render(&sample());

        let extraction = table.extract_mapping();

        assert_eq!(extraction.mapping, sample());
        assert!(extraction.discarded.is_empty());
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_round_trip_trims_padded_and_drops_empty_entries() {
        let loaded: BangMapping = [
            (" g", "https://google.com?q=%s "),
            ("a", ""),
            ("", "https://example.com?q=%s"),
        ]
        .into_iter()
        .collect();
        let mut table = BangTable::new();
        table.render(&loaded);

        let extraction = table.extract_mapping();

        let expected: BangMapping = [("g", "https://google.com?q=%s")].into_iter().collect();
        assert_eq!(extraction.mapping, expected);
        assert_eq!(extraction.discarded.len(), 2);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_extract_discards_incomplete_rows() {
        let mut table = BangTable::new();
        table.render(&sample());
        let g = table.row_at(1).unwrap().id;
        table.edit_row(g, Field::Url, "").unwrap();
        let blank = table.add_row("   ", "https://example.com?q=%s").id;

        let extraction = table.extract_mapping();

        assert_eq!(extraction.mapping.len(), 2);
        assert!(!extraction.mapping.contains("g"));
        let discarded: Vec<RowId> = extraction.discarded.iter().map(|r| r.id).collect();
        assert_eq!(discarded, vec![g, blank]);
        assert_eq!(table.row_count(), 2);
        assert!(table.find_row(g).is_none());
        assert!(table.find_row(blank).is_none());
    }

    #[test]
    fn test_extract_trims_and_later_rows_win() {
        let mut table = BangTable::new();
        table.add_row(" d ", " https://duckduckgo.com?q=%s ");
        table.add_row("g", "https://google.com?q=%s");
        table.add_row("d", "https://bing.com?q=%s");

        let extraction = table.extract_mapping();

        assert_eq!(extraction.mapping.shortcuts().collect::<Vec<_>>(), vec!["d", "g"]);
        assert_eq!(extraction.mapping.get("d"), Some("https://bing.com?q=%s"));
    }

    #[test]
    fn test_edit_reclassifies_row() {
        let mut table = BangTable::new();
        let id = table.add_row("e", "https://example.com?q=%s").id;

        let row = table.edit_row(id, Field::Shortcut, "").unwrap();
        assert_eq!(row.validity(), RowValidity::Empty);

        let row = table.edit_row(id, Field::Shortcut, "ex").unwrap();
        assert_eq!(row.validity(), RowValidity::Filled);
        assert_eq!(row.field(Field::Shortcut), "ex");
    }

    #[test]
    fn test_delete_row() {
        let mut table = BangTable::new();
        table.render(&sample());
        let d = table.row_at(0).unwrap().id;

        let removed = table.delete_row(d).unwrap();

        assert_eq!(removed.shortcut, "d");
        assert_eq!(table.row_count(), 2);
        assert!(matches!(table.delete_row(d), Err(Error::RowNotFound(id)) if id == d));
    }

    #[test]
    fn test_row_ids_are_not_reused_across_renders() {
        let mut table = BangTable::new();
        let first: Vec<RowId> = table.render(&sample()).iter().map(|r| r.id).collect();
        let second: Vec<RowId> = table.render(&sample()).iter().map(|r| r.id).collect();

        assert!(first.iter().all(|id| !second.contains(id)));
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("bang".parse::<Field>(), Ok(Field::Shortcut));
        assert_eq!("URL".parse::<Field>(), Ok(Field::Url));
        assert!("name".parse::<Field>().is_err());
    }
}
