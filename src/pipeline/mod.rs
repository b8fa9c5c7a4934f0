pub mod export;
pub mod import;

pub use export::{ExportedFile, export, export_file_name};
pub use import::{ImportReport, import, import_file};
