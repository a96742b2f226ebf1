use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::product::ProductDraft;
use crate::usecase::ports::store::PersistedList;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub observacoes: String,
}

// Dynamic columns ride along as flattened string fields next to the base ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Quantity", default)]
    pub quantity: f64,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "UnitPrice", default)]
    pub unit_price: f64,
    #[serde(rename = "Notes", default)]
    pub notes: String,
    #[serde(flatten)]
    pub extras: BTreeMap<String, String>,
}

impl From<ProductRecord> for ProductDraft {
    fn from(record: ProductRecord) -> Self {
        ProductDraft {
            name: record.name,
            quantity: record.quantity,
            category: record.category,
            unit_price: record.unit_price,
            notes: record.notes,
            extras: record.extras,
        }
    }
}

impl From<&ProductDraft> for ProductRecord {
    fn from(draft: &ProductDraft) -> Self {
        ProductRecord {
            name: draft.name.clone(),
            quantity: wire_f64(draft.quantity),
            category: draft.category.clone(),
            unit_price: wire_f64(draft.unit_price),
            notes: draft.notes.clone(),
            extras: draft.extras.clone(),
        }
    }
}

// serde_json writes a non-finite number as null, and null does not read back.
fn wire_f64(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl From<Snapshot> for PersistedList {
    fn from(snapshot: Snapshot) -> Self {
        PersistedList {
            products: snapshot.products.into_iter().map(ProductDraft::from).collect(),
            notes: snapshot.observacoes,
        }
    }
}

impl From<&PersistedList> for Snapshot {
    fn from(list: &PersistedList) -> Self {
        Snapshot {
            products: list.products.iter().map(ProductRecord::from).collect(),
            observacoes: list.notes.clone(),
        }
    }
}
