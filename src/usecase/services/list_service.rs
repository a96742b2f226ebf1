use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::category::{CategoryError, CategoryRegistry};
use crate::domain::entities::edit::EditedTable;
use crate::domain::entities::product::{
    validate_draft, Product, ProductDraft, ProductId, ProductTable, ValidationError,
};
use crate::domain::entities::schema::{ColumnError, ColumnSchema};
use crate::domain::entities::view::{DerivedView, ViewQuery};
use crate::usecase::ports::store::{PersistedList, SnapshotStore, StoreError};
use crate::usecase::services::edit_service;
use crate::usecase::services::view_service;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    Validation(ValidationError),
    Column(ColumnError),
    Category(CategoryError),
    Store(StoreError),
}

impl std::fmt::Display for ListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListError::Validation(err) => write!(f, "{err}"),
            ListError::Column(err) => write!(f, "{err}"),
            ListError::Category(err) => write!(f, "{err}"),
            ListError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ListError {}

pub struct ListService {
    table: ProductTable,
    schema: ColumnSchema,
    categories: CategoryRegistry,
    notes: String,
    store: Arc<dyn SnapshotStore>,
}

impl ListService {
    pub fn load(store: Arc<dyn SnapshotStore>) -> Result<Self, ListError> {
        let persisted = store.load().map_err(ListError::Store)?;
        let mut service = ListService {
            table: ProductTable::default(),
            schema: ColumnSchema::default(),
            categories: CategoryRegistry::default(),
            notes: persisted.notes,
            store,
        };
        for draft in persisted.products {
            service.table.push(draft);
        }
        service.normalize_columns();
        info!("loaded {} products from snapshot", service.table.rows.len());
        Ok(service)
    }

    pub fn add(&mut self, mut draft: ProductDraft) -> Result<ProductId, ListError> {
        validate_draft(&draft, &self.categories).map_err(ListError::Validation)?;
        draft
            .extras
            .retain(|key, _| self.schema.contains_dynamic(key));
        for column in &self.schema.dynamic {
            draft.extras.entry(column.clone()).or_default();
        }
        let id = self.table.push(draft);
        self.persist()?;
        Ok(id)
    }

    // Wipes the rows and the dynamic columns, keeps notes and categories.
    pub fn clear(&mut self) -> Result<(), ListError> {
        self.table.clear();
        self.schema.dynamic.clear();
        self.persist()
    }

    pub fn add_column(&mut self, name: &str) -> Result<String, ListError> {
        let label = self.schema.add(name).map_err(ListError::Column)?;
        for product in &mut self.table.rows {
            product.extras.entry(label.clone()).or_default();
        }
        self.persist()?;
        Ok(label)
    }

    pub fn remove_column(&mut self, name: &str) -> Result<String, ListError> {
        let label = self.schema.remove(name).map_err(ListError::Column)?;
        for product in &mut self.table.rows {
            product.extras.remove(&label);
        }
        self.persist()?;
        Ok(label)
    }

    pub fn apply_edits(&mut self, edited: &EditedTable) -> Result<bool, ListError> {
        let outcome = edit_service::reconcile(&self.table, edited);
        if !outcome.changed {
            return Ok(false);
        }
        self.table = outcome.next;
        self.normalize_columns();
        self.persist()?;
        Ok(true)
    }

    pub fn set_notes(&mut self, notes: &str) -> Result<bool, ListError> {
        if self.notes == notes {
            return Ok(false);
        }
        self.notes = notes.to_string();
        self.persist()?;
        Ok(true)
    }

    pub fn add_category(&mut self, label: &str) -> Result<String, ListError> {
        self.categories.add(label).map_err(ListError::Category)
    }

    pub fn view(&self, query: &ViewQuery) -> DerivedView {
        view_service::build_view(&self.table, &self.schema, query)
    }

    pub fn rows(&self) -> &[Product] {
        &self.table.rows
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    // Dynamic columns are the union of every non-base key on the rows, in
    // first-appearance order, and every row carries every dynamic column.
    fn normalize_columns(&mut self) {
        for product in &mut self.table.rows {
            let reserved: Vec<String> = product
                .extras
                .keys()
                .filter(|key| ColumnSchema::is_reserved(key.as_str()))
                .cloned()
                .collect();
            for key in reserved {
                warn!("dropping reserved column {key:?} from stored row");
                product.extras.remove(&key);
            }
        }
        for product in &self.table.rows {
            for key in product.extras.keys() {
                if !self.schema.contains_dynamic(key) {
                    self.schema.dynamic.push(key.clone());
                }
            }
        }
        for product in &mut self.table.rows {
            for column in &self.schema.dynamic {
                product.extras.entry(column.clone()).or_default();
            }
        }
    }

    // A failed save is reported but never rolls the in-memory list back.
    fn persist(&self) -> Result<(), ListError> {
        let list = PersistedList {
            products: self
                .table
                .rows
                .iter()
                .map(|product| product.draft())
                .collect(),
            notes: self.notes.clone(),
        };
        self.store.save(&list).map_err(|err| {
            warn!("snapshot save failed, in-memory list still current: {err}");
            ListError::Store(err)
        })
    }
}
