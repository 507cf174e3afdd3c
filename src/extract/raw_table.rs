/// One table row after cleaning: trimmed, non-empty cell texts in document order.
pub type RawRow = Vec<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Cleaned `<th>` texts. Empty when the table carries no header cells.
    pub headers: RawRow,
    /// Every remaining `<tr>`, cleaned. Rows without data cells stay as empty rows.
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn has_header(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Position of `name` in the header row, by exact match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}
