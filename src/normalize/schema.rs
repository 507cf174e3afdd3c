// src/normalize/schema.rs

/// How a column's cell text is turned into a [`super::Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Kept verbatim.
    Text,
    /// Text with every whitespace character removed ("Lewis Hamilton" → "LewisHamilton").
    Name,
    /// Base-10 integer.
    Integer,
    /// Calendar date.
    Date,
    /// Time of day, `H:MM:SS.fff`.
    Time,
}

impl ColumnKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ColumnKind::Text | ColumnKind::Name => "text",
            ColumnKind::Integer => "integer",
            ColumnKind::Date => "date",
            ColumnKind::Time => "time of day",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Unparseable text becomes `Value::Null` instead of an error.
    pub nullable: bool,
}

impl Column {
    pub const fn required(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    pub const fn nullable(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
        }
    }
}

/// Ordered list of columns picked out of a results table by header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableSchema {
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == column)
    }
}

/// One row per round on a season index page.
pub const SEASON_SCHEMA: TableSchema = TableSchema {
    name: "season",
    columns: &[
        Column::required("Grand Prix", ColumnKind::Text),
        Column::required("Date", ColumnKind::Date),
        Column::nullable("Time", ColumnKind::Time),
        Column::required("Winner", ColumnKind::Name),
        Column::required("Car", ColumnKind::Text),
        Column::nullable("Laps", ColumnKind::Integer),
    ],
};

/// One row per classified entrant on a race result page.
pub const RACE_SCHEMA: TableSchema = TableSchema {
    name: "race",
    columns: &[
        Column::nullable("Pos", ColumnKind::Integer),
        Column::required("No", ColumnKind::Integer),
        Column::required("Driver", ColumnKind::Name),
        Column::required("Car", ColumnKind::Text),
        Column::nullable("Laps", ColumnKind::Integer),
        Column::nullable("PTS", ColumnKind::Integer),
    ],
};
