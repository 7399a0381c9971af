use thiserror::Error;

/// Validation and contract errors exposed by `persona-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("name and description are required parameters")]
    MissingPersonaFields,

    #[error("missing required parameters: {}", .missing.join(", "))]
    MissingTradeParameters { missing: Vec<&'static str> },
}
