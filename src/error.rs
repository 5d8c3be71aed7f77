use thiserror::Error;

/// Errors raised while computing a point score.
///
/// A failed call never yields a partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    /// Segmentation produced no sentences or no words.
    #[error("text contains no words to score")]
    EmptyInput,

    #[error("unsupported language '{0}' for sentence segmentation")]
    UnsupportedLanguage(String),

    /// Only raised when strict priority checking is enabled.
    #[error("invalid priority {0}: must be between 1 and 5")]
    InvalidPriority(i64),

    #[error("invalid normalizing factor {0}: must be a finite number")]
    InvalidNormalizingFactor(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ScoreError::EmptyInput.to_string(),
            "text contains no words to score"
        );
        assert_eq!(
            ScoreError::UnsupportedLanguage("xx".to_string()).to_string(),
            "unsupported language 'xx' for sentence segmentation"
        );
        assert!(ScoreError::InvalidPriority(9).to_string().contains("9"));
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = ScoreError::EmptyInput.into();
        assert!(err.downcast_ref::<ScoreError>().is_some());
    }
}
