pub const FALLBACK_COLOR: &str = "#9E9E9E";

const SEED_CATEGORIES: [(&str, &str); 11] = [
    ("Grãos", "#FFC107"),
    ("Laticínios", "#2196F3"),
    ("Carnes", "#F44336"),
    ("Frutas", "#4CAF50"),
    ("Verduras", "#8BC34A"),
    ("Bebidas", "#9C27B0"),
    ("Limpeza", "#00BCD4"),
    ("Higiene", "#E91E63"),
    ("Padaria", "#FF9800"),
    ("Congelados", "#607D8B"),
    ("Outros", "#795548"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    EmptyLabel,
    AlreadyExists(String),
}

impl std::fmt::Display for CategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryError::EmptyLabel => write!(f, "category label must not be empty"),
            CategoryError::AlreadyExists(label) => {
                write!(f, "category already exists: {label}")
            }
        }
    }
}

impl std::error::Error for CategoryError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    entries: Vec<(String, String)>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        CategoryRegistry {
            entries: SEED_CATEGORIES
                .iter()
                .map(|(label, color)| (label.to_string(), color.to_string()))
                .collect(),
        }
    }
}

impl CategoryRegistry {
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(known, _)| known == label)
    }

    // Rendering never fails on an unknown label, it falls back to grey.
    pub fn color_of(&self, label: &str) -> &str {
        self.entries
            .iter()
            .find(|(known, _)| known == label)
            .map(|(_, color)| color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn add(&mut self, label: &str) -> Result<String, CategoryError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(CategoryError::EmptyLabel);
        }
        if self.contains(label) {
            return Err(CategoryError::AlreadyExists(label.to_string()));
        }
        self.entries.push((label.to_string(), FALLBACK_COLOR.to_string()));
        Ok(label.to_string())
    }
}
