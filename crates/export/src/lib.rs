pub mod xlsx;

pub use xlsx::{format_warehouse, write_workbook, ExportError, COLUMNS};
