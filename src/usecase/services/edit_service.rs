use std::collections::BTreeMap;

use crate::domain::entities::edit::EditedTable;
use crate::domain::entities::product::{Product, ProductDraft, ProductId, ProductTable};

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub changed: bool,
    pub next: ProductTable,
}

// Folds an edited table back into the canonical one by row identity, so rows
// keep their canonical position no matter how the editor filtered or sorted
// its slice. A presented row that comes back missing is a deletion, a row
// with no known id is an append.
pub fn reconcile(current: &ProductTable, edited: &EditedTable) -> Reconciliation {
    let edited_by_id: BTreeMap<ProductId, &ProductDraft> = edited
        .rows
        .iter()
        .filter_map(|row| row.id.map(|id| (id, &row.draft)))
        .collect();

    let mut next = ProductTable {
        rows: Vec::with_capacity(current.rows.len()),
        next_id: current.next_id,
    };

    for product in &current.rows {
        if let Some(draft) = edited_by_id.get(&product.id) {
            next.rows
                .push(Product::from_draft(product.id, (*draft).clone()));
        } else if !edited.presented.contains(&product.id) {
            // Outside the editor's slice, untouched.
            next.rows.push(product.clone());
        }
    }

    for row in &edited.rows {
        let known = row
            .id
            .map(|id| current.get(id).is_some())
            .unwrap_or(false);
        if !known {
            next.push(row.draft.clone());
        }
    }

    Reconciliation {
        changed: next != *current,
        next,
    }
}
