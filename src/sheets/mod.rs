pub mod client;
pub mod csv_store;
pub mod models;
pub mod store;

pub use client::{Access, SheetTarget, SheetsClient};
pub use csv_store::CsvStore;
pub use store::{publish, PublishReport, SheetStore};
