pub mod edit_service;
pub mod export_service;
pub mod list_service;
pub mod view_service;
