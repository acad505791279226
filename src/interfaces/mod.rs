//! Presentation adapters: CSV export and JSON views of domain objects.

pub mod csv;
pub mod json;
