//! Sparse two-dimensional table with row and column spanning
//!
//! Rows and columns are 1-based, so the top-left cell is `(1, 1)`. Every slot
//! holds either a [`Cell`] or [`Entry::Spanned`], which marks a slot covered
//! by a cell above or to the left of it.
//!
//! No operation here fails. Writes may land anywhere, and spans that overlap
//! earlier cells overwrite them: the last write wins.

use crate::types::Attributes;
use std::collections::HashMap;

/// Contents of a cell: raw markup or a nested table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellContents {
    /// Markup written unescaped when the table is rendered
    Markup(String),
    /// A table rendered inside the cell
    Table(Box<Table>),
}

impl From<&str> for CellContents {
    fn from(s: &str) -> Self {
        CellContents::Markup(s.to_string())
    }
}

impl From<String> for CellContents {
    fn from(s: String) -> Self {
        CellContents::Markup(s)
    }
}

impl From<i64> for CellContents {
    fn from(i: i64) -> Self {
        CellContents::Markup(itoa::Buffer::new().format(i).to_string())
    }
}

impl From<i32> for CellContents {
    fn from(i: i32) -> Self {
        CellContents::from(i as i64)
    }
}

impl From<Table> for CellContents {
    fn from(table: Table) -> Self {
        CellContents::Table(Box::new(table))
    }
}

/// A table cell with optional contents and its own attributes
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    contents: Option<CellContents>,
    attributes: Attributes,
}

impl Cell {
    /// Create a cell without contents; it renders as an empty cell
    pub fn new() -> Self {
        Cell::default()
    }

    pub fn with_contents(contents: impl Into<CellContents>) -> Self {
        Cell {
            contents: Some(contents.into()),
            attributes: Attributes::new(),
        }
    }

    pub fn contents(&self) -> Option<&CellContents> {
        self.contents.as_ref()
    }

    pub fn set_contents(&mut self, contents: impl Into<CellContents>) -> &mut Self {
        self.contents = Some(contents.into());
        self
    }

    pub fn clear_contents(&mut self) -> &mut Self {
        self.contents = None;
        self
    }

    /// Set `colspan`; a span of 1 removes the attribute
    pub fn colspan(&mut self, span: u32) -> &mut Self {
        self.span("colspan", span)
    }

    /// Set `rowspan`; a span of 1 removes the attribute
    pub fn rowspan(&mut self, span: u32) -> &mut Self {
        self.span("rowspan", span)
    }

    fn span(&mut self, key: &str, span: u32) -> &mut Self {
        if span == 1 {
            self.attributes.shift_remove(key);
            return self;
        }
        let mut buffer = itoa::Buffer::new();
        self.set_attribute(key, buffer.format(span))
    }

    /// Add or overwrite an attribute
    pub fn set_attribute(&mut self, key: &str, value: &str) -> &mut Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|v| v.as_str())
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl From<CellContents> for Cell {
    fn from(contents: CellContents) -> Self {
        Cell {
            contents: Some(contents),
            attributes: Attributes::new(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::with_contents(s)
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::with_contents(s)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::with_contents(i)
    }
}

impl From<i32> for Cell {
    fn from(i: i32) -> Self {
        Cell::with_contents(i)
    }
}

impl From<Table> for Cell {
    fn from(table: Table) -> Self {
        Cell::with_contents(table)
    }
}

/// One occupied slot of the grid
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entry {
    Cell(Cell),
    /// Covered by the span of another cell
    Spanned,
}

impl Entry {
    pub fn is_spanned(&self) -> bool {
        matches!(self, Entry::Spanned)
    }

    pub fn as_cell(&self) -> Option<&Cell> {
        match self {
            Entry::Cell(cell) => Some(cell),
            Entry::Spanned => None,
        }
    }

    pub fn as_cell_mut(&mut self) -> Option<&mut Cell> {
        match self {
            Entry::Cell(cell) => Some(cell),
            Entry::Spanned => None,
        }
    }
}

/// The entries of one row, keyed by column
pub type RowEntries = HashMap<u32, Entry>;

/// Sparse 1-based grid of cells
///
/// # Examples
///
/// ```
/// use htmlstream::table::{Entry, Table};
///
/// let mut table = Table::new();
/// table.put(1, 1, "Name");
/// table.put_spanning(2, 1, 1, 2, "spans two columns");
///
/// assert_eq!(table.max_rows(), 2);
/// assert_eq!(table.max_columns(), 2);
/// assert_eq!(table.peek(2, 2), Some(&Entry::Spanned));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    attributes: Attributes,
    header_row: bool,
    rows: HashMap<u32, RowEntries>,
    row_attributes: HashMap<u32, Attributes>,
    max_rows: u32,
    max_columns: u32,
}

impl Default for Table {
    fn default() -> Self {
        Table {
            attributes: Attributes::new(),
            header_row: true,
            rows: HashMap::new(),
            row_attributes: HashMap::new(),
            max_rows: 0,
            max_columns: 0,
        }
    }
}

impl Table {
    /// Create an empty table; row 1 is a header row by default
    pub fn new() -> Self {
        Table::default()
    }

    /// Look up an entry
    ///
    /// Even a miss counts as a use of `(row, column)`: the dimensions grow to
    /// include it and the row is created, so it renders with empty cells.
    /// Use [`peek`](Self::peek) for a lookup without these side effects.
    pub fn get(&mut self, row: u32, column: u32) -> Option<&Entry> {
        self.extend(row, column);
        self.rows.entry(row).or_default().get(&column)
    }

    /// Look up an entry without touching the dimensions
    pub fn peek(&self, row: u32, column: u32) -> Option<&Entry> {
        self.rows.get(&row).and_then(|r| r.get(&column))
    }

    /// Mutable access to the cell at `(row, column)`, if there is one
    pub fn cell_mut(&mut self, row: u32, column: u32) -> Option<&mut Cell> {
        self.rows
            .get_mut(&row)
            .and_then(|r| r.get_mut(&column))
            .and_then(Entry::as_cell_mut)
    }

    /// The entries of a row, if the row was ever written or read
    pub fn row(&self, row: u32) -> Option<&RowEntries> {
        self.rows.get(&row)
    }

    /// Store a value at `(row, column)`, wrapping it in a cell unless it is one
    pub fn put(&mut self, row: u32, column: u32, entry: impl Into<Cell>) -> &mut Cell {
        let slot = self.slot(row, column);
        fill_slot(slot, entry.into())
    }

    /// Store a value covering `rows` x `columns` slots starting at `(row, column)`
    ///
    /// The top-left slot keeps the returned cell, which gets `rowspan` and
    /// `colspan` attributes; every other slot in the area is marked
    /// [`Entry::Spanned`].
    pub fn put_spanning(
        &mut self,
        row: u32,
        column: u32,
        rows: u32,
        columns: u32,
        contents: impl Into<CellContents>,
    ) -> &mut Cell {
        let mut top_left = Cell::with_contents(contents);
        top_left.colspan(columns).rowspan(rows);

        for r in row..row.saturating_add(rows) {
            for c in column..column.saturating_add(columns) {
                self.mark_spanned(r, c);
            }
        }
        self.put(row, column, top_left)
    }

    /// Mark a single slot as covered by another cell's span
    pub fn mark_spanned(&mut self, row: u32, column: u32) {
        *self.slot(row, column) = Entry::Spanned;
    }

    fn slot(&mut self, row: u32, column: u32) -> &mut Entry {
        self.extend(row, column);
        self.rows
            .entry(row)
            .or_default()
            .entry(column)
            .or_insert(Entry::Spanned)
    }

    fn extend(&mut self, row: u32, column: u32) {
        self.max_rows = self.max_rows.max(row);
        self.max_columns = self.max_columns.max(column);
    }

    pub fn set_row_attributes(&mut self, row: u32, attributes: Attributes) {
        self.row_attributes.insert(row, attributes);
    }

    /// Add or overwrite one attribute of a row
    pub fn set_row_attribute(&mut self, row: u32, key: &str, value: &str) {
        self.row_attributes
            .entry(row)
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn row_attributes(&self, row: u32) -> Option<&Attributes> {
        self.row_attributes.get(&row)
    }

    /// Add or overwrite a table attribute
    pub fn set_attribute(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Remove a table attribute; absent keys are ignored
    pub fn remove_attribute(&mut self, key: &str) {
        self.attributes.shift_remove(key);
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Render row 1 with `th` cells
    pub fn set_header_row(&mut self, header_row: bool) {
        self.header_row = header_row;
    }

    pub fn header_row(&self) -> bool {
        self.header_row
    }

    pub fn max_rows(&self) -> u32 {
        self.max_rows
    }

    pub fn max_columns(&self) -> u32 {
        self.max_columns
    }
}

fn fill_slot(slot: &mut Entry, cell: Cell) -> &mut Cell {
    match slot {
        Entry::Cell(existing) => {
            *existing = cell;
            existing
        }
        Entry::Spanned => {
            *slot = Entry::Cell(Cell::default());
            fill_slot(slot, cell)
        }
    }
}
