use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Export error: {0}")]
    Io(#[from] std::io::Error)
}
