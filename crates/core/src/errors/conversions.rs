//! Conversion implementations for error types

use super::types::Error;

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_keeps_message_and_source() {
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let expected = source.to_string();

        let err = Error::from(source);
        assert!(matches!(&err, Error::Json { message, .. } if *message == expected));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("JSON error: "));
    }
}
