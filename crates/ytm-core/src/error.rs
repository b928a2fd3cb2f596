use thiserror::Error;

#[derive(Debug, Error)]
pub enum YtmError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Decimal overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for YtmError {
    fn from(e: serde_json::Error) -> Self {
        YtmError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero_message_names_context() {
        let err = YtmError::DivisionByZero {
            context: "average price".into(),
        };
        assert_eq!(err.to_string(), "Division by zero in average price");
    }

    #[test]
    fn test_serde_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: YtmError = parse_err.into();
        assert!(matches!(err, YtmError::SerializationError(_)));
    }
}
