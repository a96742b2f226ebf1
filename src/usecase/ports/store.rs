use crate::domain::entities::product::ProductDraft;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Message(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedList {
    pub products: Vec<ProductDraft>,
    pub notes: String,
}

pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<PersistedList, StoreError>;
    fn save(&self, list: &PersistedList) -> Result<(), StoreError>;
}
