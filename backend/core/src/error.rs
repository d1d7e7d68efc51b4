use thiserror::Error;

/// Top-level error type for the freshlens runtime.
///
/// Malformed model replies are not errors: the parser absorbs them and
/// reports [`ParseWarning`]s instead.
#[derive(Debug, Error)]
pub enum FreshError {
    #[error("vision model error ({provider}): {message}")]
    ExternalCall { provider: String, message: String },

    #[error("report export failed: {0}")]
    Export(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("image error: {0}")]
    Image(String),
}

impl FreshError {
    pub fn external(provider: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::ExternalCall {
            provider: provider.into(),
            message: err.to_string(),
        }
    }

    /// The message shown to the user. External-call failures stay generic;
    /// the cause goes to the log instead.
    pub fn user_message(&self) -> String {
        match self {
            Self::ExternalCall { .. } => "Error analyzing image".to_string(),
            Self::Export(cause) => format!("Error generating PDF report: {cause}"),
            other => other.to_string(),
        }
    }
}

/// A field-level problem found while parsing a model reply.
///
/// Each warning maps to a default value in the parsed analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    #[error("reply has no 'Produce:' line")]
    MissingProduce,

    #[error("freshness score '{raw}' is not a whole number; using 0")]
    NonNumericFreshness { raw: String },

    #[error("expected lifespan '{raw}' contains no number; using 0")]
    MissingLifespan { raw: String },

    #[error("{count} bullet line(s) ignored: reply has no 'Key Indicators:' line")]
    IndicatorsWithoutMarker { count: usize },
}
