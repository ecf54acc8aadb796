use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateError {
    #[error("Date error: {0}")]
    Empty(String),
    #[error("Date error: unrecognised date '{0}'")]
    Unrecognised(String)
}
