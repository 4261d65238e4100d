/// Errors that can occur while resolving a document chain.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// Transport failure, non-success status, or an unreadable/refused location.
    #[error("failed to fetch {location}: {reason}")]
    Fetch { location: String, reason: String },

    /// Body is not valid JSON, or lacks a required pointer/payload field.
    #[error("failed to parse {location}: {reason}")]
    Parse { location: String, reason: String },
}

impl ChainError {
    pub(crate) fn fetch(location: &str, reason: impl std::fmt::Display) -> Self {
        ChainError::Fetch {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn parse(location: &str, reason: impl std::fmt::Display) -> Self {
        ChainError::Parse {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The location whose fetch or parse failed.
    pub fn location(&self) -> &str {
        match self {
            ChainError::Fetch { location, .. } | ChainError::Parse { location, .. } => location,
        }
    }
}
