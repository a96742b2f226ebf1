pub mod csv;
#[cfg(feature = "xlsx")]
pub mod xlsx;
