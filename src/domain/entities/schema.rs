pub const NAME_COLUMN: &str = "Name";
pub const QUANTITY_COLUMN: &str = "Quantity";
pub const CATEGORY_COLUMN: &str = "Category";
pub const UNIT_PRICE_COLUMN: &str = "UnitPrice";
pub const NOTES_COLUMN: &str = "Notes";
pub const TOTAL_COLUMN: &str = "Total";

pub const BASE_COLUMNS: [&str; 5] = [
    NAME_COLUMN,
    QUANTITY_COLUMN,
    CATEGORY_COLUMN,
    UNIT_PRICE_COLUMN,
    NOTES_COLUMN,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    AlreadyExists(String),
    NotFound(String),
}

impl std::fmt::Display for ColumnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnError::AlreadyExists(name) => write!(f, "column already exists: {name}"),
            ColumnError::NotFound(name) => write!(f, "no such column: {name}"),
        }
    }
}

impl std::error::Error for ColumnError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    pub dynamic: Vec<String>,
}

impl ColumnSchema {
    pub fn is_base(name: &str) -> bool {
        BASE_COLUMNS.contains(&name)
    }

    // Total is never a storable column, only ever derived.
    pub fn is_reserved(name: &str) -> bool {
        Self::is_base(name) || name == TOTAL_COLUMN
    }

    pub fn contains_dynamic(&self, name: &str) -> bool {
        self.dynamic.iter().any(|column| column == name)
    }

    pub fn add(&mut self, name: &str) -> Result<String, ColumnError> {
        let label = name.trim();
        if label.is_empty() || Self::is_reserved(label) || self.contains_dynamic(label) {
            return Err(ColumnError::AlreadyExists(label.to_string()));
        }
        self.dynamic.push(label.to_string());
        Ok(label.to_string())
    }

    pub fn remove(&mut self, name: &str) -> Result<String, ColumnError> {
        let label = name.trim();
        let position = self
            .dynamic
            .iter()
            .position(|column| column == label)
            .ok_or_else(|| ColumnError::NotFound(label.to_string()))?;
        Ok(self.dynamic.remove(position))
    }

    // Column order a derived view presents: base, then dynamic, then Total.
    pub fn view_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = BASE_COLUMNS.iter().map(|name| name.to_string()).collect();
        columns.extend(self.dynamic.iter().cloned());
        columns.push(TOTAL_COLUMN.to_string());
        columns
    }
}
