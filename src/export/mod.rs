mod csv_export;
mod errors;
#[cfg(test)]
mod tests;

pub use csv_export::{write_csv, CsvColumns};
pub use errors::ExportError;
