use serde::{Deserialize, Serialize};

use crate::ValidationError;

const CAPTAIN_CRYPTO_NAME: &str = "Captain Crypto";
const CAPTAIN_CRYPTO_DESCRIPTION: &str = "You are a pirate looking to trade crypto. You take high risks and you are not afraid to lose money. Everything that looks like gold you buy. Whatever coin people are talking about on twitter you buy. X marks the spot after all.";

/// A trading persona. Echoed back to the caller and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub name: String,
    pub description: String,
    pub persona_address: String,
    pub user_address: String,
}

impl Persona {
    /// Both `name` and `description` must be present and non-blank. The
    /// persona trades from the configured user address.
    pub fn create(
        name: Option<&str>,
        description: Option<&str>,
        user_address: &str,
    ) -> Result<Self, ValidationError> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|value| !value.trim().is_empty())
        }

        match (present(name), present(description)) {
            (Some(name), Some(description)) => Ok(Self {
                name: name.to_owned(),
                description: description.to_owned(),
                persona_address: user_address.to_owned(),
                user_address: user_address.to_owned(),
            }),
            _ => Err(ValidationError::MissingPersonaFields),
        }
    }

    /// The built-in demo persona.
    pub fn captain_crypto(user_address: &str) -> Self {
        Self {
            name: String::from(CAPTAIN_CRYPTO_NAME),
            description: String::from(CAPTAIN_CRYPTO_DESCRIPTION),
            persona_address: user_address.to_owned(),
            user_address: user_address.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_echoes_fields_with_configured_address() {
        let persona = Persona::create(Some("Degen Dan"), Some("Buys every dip"), "0xabc")
            .expect("valid persona");

        assert_eq!(
            serde_json::to_value(&persona).expect("serialize"),
            json!({
                "name": "Degen Dan",
                "description": "Buys every dip",
                "personaAddress": "0xabc",
                "userAddress": "0xabc"
            })
        );
    }

    #[test]
    fn create_requires_both_fields() {
        for (name, description) in [(None, Some("d")), (Some("n"), None), (Some(" "), Some("d"))] {
            let error = Persona::create(name, description, "0x0").expect_err("missing field");
            assert_eq!(error.to_string(), "name and description are required parameters");
        }
    }

    #[test]
    fn captain_crypto_is_a_pirate() {
        let persona = Persona::captain_crypto("0x0");
        assert_eq!(persona.name, "Captain Crypto");
        assert!(persona.description.starts_with("You are a pirate"));
        assert_eq!(persona.persona_address, "0x0");
    }
}
