use crate::domain::entities::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Quantity,
    Category,
    UnitPrice,
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewQuery {
    pub category: Option<String>,
    pub sort: Option<SortSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub product: Product,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedView {
    pub columns: Vec<String>,
    pub rows: Vec<ViewRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSummary {
    pub product_count: usize,
    pub item_count: f64,
    pub total_value: f64,
    pub average_unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}
