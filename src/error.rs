use thiserror::Error;

use crate::document::Shape;

/// Errors raised while turning raw YAML bytes into an HTML table.
#[derive(Error, Debug)]
pub enum YamlTableError {
    /// The input parsed neither as a list of records nor as a single record.
    #[error("Unable to decode YAML document: {0}")]
    Decode(#[source] serde_yaml::Error),
    /// A record list contained something other than a record.
    #[error("Record list element must be a record, found {shape}")]
    Shape {
        /// Shape of the offending element.
        shape: Shape,
    },
}

impl YamlTableError {
    /// Returns `true` for errors caused by the document structure rather than its syntax.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, YamlTableError::Shape { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_message() {
        let err = YamlTableError::Shape {
            shape: Shape::Number,
        };
        assert!(err.is_shape_error());
        assert_eq!(
            err.to_string(),
            "Record list element must be a record, found number"
        );
    }

    #[test]
    fn test_decode_error_keeps_diagnostic() {
        let diagnostic = serde_yaml::from_str::<crate::decoder::RawRecord>("a: [").unwrap_err();
        let expected = diagnostic.to_string();
        let err = YamlTableError::Decode(diagnostic);
        assert!(!err.is_shape_error());
        assert!(err.to_string().ends_with(&expected));
    }
}
