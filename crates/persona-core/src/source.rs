use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Upstream data provider identifiers used in logs and error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Coingecko,
    Twitter,
    Santiment,
    Cryptopanic,
    Bitte,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coingecko => "coingecko",
            Self::Twitter => "twitter",
            Self::Santiment => "santiment",
            Self::Cryptopanic => "cryptopanic",
            Self::Bitte => "bitte",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_serde_use_lowercase_names() {
        for (id, name) in [
            (ProviderId::Coingecko, "coingecko"),
            (ProviderId::Twitter, "twitter"),
            (ProviderId::Santiment, "santiment"),
            (ProviderId::Cryptopanic, "cryptopanic"),
            (ProviderId::Bitte, "bitte"),
        ] {
            assert_eq!(id.to_string(), name);
            assert_eq!(
                serde_json::to_value(id).expect("serialize"),
                serde_json::Value::from(name)
            );
        }
    }
}
