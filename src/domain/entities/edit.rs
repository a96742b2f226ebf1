use crate::domain::entities::product::{ProductDraft, ProductId};
use crate::domain::entities::view::DerivedView;

#[derive(Debug, Clone, PartialEq)]
pub struct EditedRow {
    // None marks a row the editor created rather than one it was handed.
    pub id: Option<ProductId>,
    pub draft: ProductDraft,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditedTable {
    pub presented: Vec<ProductId>,
    pub rows: Vec<EditedRow>,
}

impl EditedTable {
    pub fn from_view(view: &DerivedView) -> Self {
        EditedTable {
            presented: view.rows.iter().map(|row| row.product.id).collect(),
            rows: view
                .rows
                .iter()
                .map(|row| EditedRow {
                    id: Some(row.product.id),
                    draft: row.product.draft(),
                })
                .collect(),
        }
    }
}
