use crate::domain::entities::product::ProductTable;
use crate::domain::entities::schema::{
    ColumnSchema, CATEGORY_COLUMN, NAME_COLUMN, NOTES_COLUMN, QUANTITY_COLUMN, TOTAL_COLUMN,
    UNIT_PRICE_COLUMN,
};
use crate::domain::entities::view::{
    CategoryCount, CategoryTotal, DerivedView, SortDirection, SortKey, SortSpec, ViewQuery,
    ViewRow, ViewSummary,
};

pub fn build_view(table: &ProductTable, schema: &ColumnSchema, query: &ViewQuery) -> DerivedView {
    let mut rows: Vec<ViewRow> = table
        .rows
        .iter()
        .filter(|product| match &query.category {
            Some(category) => product.category == *category,
            None => true,
        })
        .map(|product| ViewRow {
            total: product.total(),
            product: product.clone(),
        })
        .collect();
    if let Some(spec) = query.sort {
        sort_rows(&mut rows, spec);
    }
    DerivedView {
        columns: schema.view_columns(),
        rows,
    }
}

// Stable on ties in both directions, so equal keys keep their insertion order.
fn sort_rows(rows: &mut [ViewRow], spec: SortSpec) {
    rows.sort_by(|a, b| {
        let ordering = match spec.key {
            SortKey::Name => a.product.name.cmp(&b.product.name),
            SortKey::Quantity => a.product.quantity.total_cmp(&b.product.quantity),
            SortKey::Category => a.product.category.cmp(&b.product.category),
            SortKey::UnitPrice => a.product.unit_price.total_cmp(&b.product.unit_price),
            SortKey::Total => a.total.total_cmp(&b.total),
        };
        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn cell_text(row: &ViewRow, column: &str) -> String {
    match column {
        NAME_COLUMN => row.product.name.clone(),
        QUANTITY_COLUMN => crate::format_f64(row.product.quantity),
        CATEGORY_COLUMN => row.product.category.clone(),
        UNIT_PRICE_COLUMN => crate::format_f64(row.product.unit_price),
        NOTES_COLUMN => row.product.notes.clone(),
        TOTAL_COLUMN => crate::format_f64(row.total),
        other => row.product.extras.get(other).cloned().unwrap_or_default(),
    }
}

pub fn summarize(view: &DerivedView) -> ViewSummary {
    let product_count = view.rows.len();
    let item_count: f64 = view.rows.iter().map(|row| row.product.quantity).sum();
    let total_value: f64 = view.rows.iter().map(|row| row.total).sum();
    let price_sum: f64 = view.rows.iter().map(|row| row.product.unit_price).sum();
    ViewSummary {
        product_count,
        item_count,
        total_value,
        average_unit_price: crate::safe_div(price_sum, product_count as f64),
    }
}

pub fn category_counts(view: &DerivedView) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for row in &view.rows {
        match counts
            .iter_mut()
            .find(|entry| entry.category == row.product.category)
        {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: row.product.category.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn category_totals(view: &DerivedView) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for row in &view.rows {
        match totals
            .iter_mut()
            .find(|entry| entry.category == row.product.category)
        {
            Some(entry) => entry.total += row.total,
            None => totals.push(CategoryTotal {
                category: row.product.category.clone(),
                total: row.total,
            }),
        }
    }
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}
