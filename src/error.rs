// nc_bulk_loader/src/error.rs
// Defines custom error types for the nc_bulk_loader module.

use thiserror::Error;

#[derive(Debug, Error,)]
pub enum LoaderError {
    #[error("Failed to connect to search engine: {0}")]
    ConnectionError(String,),
    #[error("Index operation failed: {0}")]
    IndexError(String,),
    #[error("Bulk request failed: {0}")]
    BulkError(String,),
    #[error("Failed to parse input: {0}")]
    ParseError(String,),
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String,),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error,),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error,),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error,),
    #[error("Other error: {0}")]
    Other(String,),
}

impl LoaderError {
    /// Errors raised while reading or decoding an input file.
    pub fn is_parse_error(&self,) -> bool {
        matches!(
            self,
            LoaderError::ParseError(_,)
                | LoaderError::IoError(_,)
                | LoaderError::CsvError(_,)
                | LoaderError::JsonError(_,)
        )
    }
}

impl From<opensearch::Error,> for LoaderError {
    fn from(err: opensearch::Error,) -> Self {
        LoaderError::ConnectionError(err.to_string(),)
    }
}

pub type Result<T,> = std::result::Result<T, LoaderError,>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_classified() {
        let io = LoaderError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing",),);
        assert!(io.is_parse_error());
        assert!(LoaderError::ParseError("bad header".into()).is_parse_error());
        assert!(!LoaderError::ConnectionError("refused".into()).is_parse_error());
        assert!(!LoaderError::BulkError("413".into()).is_parse_error());
    }

    #[test]
    fn messages_carry_the_cause() {
        let err = LoaderError::IndexError("resource_already_exists_exception".into(),);
        assert_eq!(
            err.to_string(),
            "Index operation failed: resource_already_exists_exception"
        );
    }
}
