pub mod category;
pub mod edit;
pub mod product;
pub mod schema;
pub mod view;
