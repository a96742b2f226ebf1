use std::collections::BTreeMap;

use crate::domain::entities::category::CategoryRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        ProductId(value)
    }
}

impl From<ProductId> for u64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub quantity: f64,
    pub category: String,
    pub unit_price: f64,
    pub notes: String,
    pub extras: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: f64,
    pub category: String,
    pub unit_price: f64,
    pub notes: String,
    pub extras: BTreeMap<String, String>,
}

impl Product {
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Product {
            id,
            name: draft.name,
            quantity: draft.quantity,
            category: draft.category,
            unit_price: draft.unit_price,
            notes: draft.notes,
            extras: draft.extras,
        }
    }

    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            quantity: self.quantity,
            category: self.category.clone(),
            unit_price: self.unit_price,
            notes: self.notes.clone(),
            extras: self.extras.clone(),
        }
    }

    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductTable {
    pub rows: Vec<Product>,
    pub next_id: u64,
}

impl Default for ProductTable {
    fn default() -> Self {
        ProductTable {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl ProductTable {
    pub fn push(&mut self, draft: ProductDraft) -> ProductId {
        let id = ProductId(self.next_id);
        self.next_id += 1;
        self.rows.push(Product::from_draft(id, draft));
        id
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.rows.iter().find(|product| product.id == id)
    }

    // Ids minted so far stay burned, the counter survives a wipe.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    NegativeQuantity,
    NegativeUnitPrice,
    UnknownCategory(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "product name must not be empty"),
            ValidationError::NegativeQuantity => {
                write!(f, "quantity must be a non-negative number")
            }
            ValidationError::NegativeUnitPrice => {
                write!(f, "unit price must be a non-negative number")
            }
            ValidationError::UnknownCategory(label) => {
                write!(f, "unknown category: {label}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_draft(
    draft: &ProductDraft,
    categories: &CategoryRegistry,
) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !draft.quantity.is_finite() || draft.quantity < 0.0 {
        return Err(ValidationError::NegativeQuantity);
    }
    if !draft.unit_price.is_finite() || draft.unit_price < 0.0 {
        return Err(ValidationError::NegativeUnitPrice);
    }
    if !categories.contains(&draft.category) {
        return Err(ValidationError::UnknownCategory(draft.category.clone()));
    }
    Ok(())
}
