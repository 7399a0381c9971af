use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Uppercase ticker of a coin flagged as trending by the discovery source.
///
/// Identity is the string value alone; two equal tickers are the same symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrendingSymbol(String);

impl TrendingSymbol {
    /// Parse and normalize a ticker to uppercase.
    ///
    /// Tickers are not restricted to ASCII or capped in length: trending
    /// lists regularly carry symbols such as `USD₮`, which are kept as-is
    /// apart from case folding.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TrendingSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TrendingSymbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for TrendingSymbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TrendingSymbol> for String {
    fn from(value: TrendingSymbol) -> Self {
        value.0
    }
}
