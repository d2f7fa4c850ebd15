use std::error::Error;
use std::fmt;

/// Pipeline stage an error surfaced from.
///
/// The engine itself is total by construction: indexing, classification and
/// annotation cannot fail on a decoded document. Failures carry the boundary
/// stage they were raised at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decode,
    Encode,
    Io,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode => write!(f, "decode"),
            Self::Encode => write!(f, "encode"),
            Self::Io => write!(f, "io"),
        }
    }
}

/// Structured failure: stage tag + message + optional wrapped cause.
#[derive(Debug)]
pub struct DiffError {
    pub stage: Stage,
    pub message: String,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl DiffError {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        stage: Stage,
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            stage,
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}: {}", self.stage, self.message, source),
            None => write!(f, "{}: {}", self.stage, self.message),
        }
    }
}

impl Error for DiffError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_stage_and_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = DiffError::with_source(Stage::Decode, "cannot open workbook", io);
        assert_eq!(err.to_string(), "decode: cannot open workbook: gone");
    }

    #[test]
    fn display_without_cause() {
        let err = DiffError::new(Stage::Encode, "no sheets");
        assert_eq!(err.to_string(), "encode: no sheets");
    }

    #[test]
    fn source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "inner");
        let err = DiffError::with_source(Stage::Io, "outer", io);
        assert!(err.source().is_some());
    }
}
