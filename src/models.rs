//! Data models and structures
//!
//! Defines the wire payloads for the generation endpoint, the closed set of
//! animal subjects, and process configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Longest phrase accepted for printing on the shirt.
pub const MAX_PHRASE_LEN: usize = 50;

/// The animals the studio knows how to photograph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animal {
    Cat,
    Dog,
    Rabbit,
    Bear,
    Lion,
    Tiger,
    Elephant,
    Panda,
    Fox,
    Wolf,
}

impl Animal {
    /// Every supported subject, in the order the page lists them.
    pub const ALL: [Animal; 10] = [
        Animal::Cat,
        Animal::Dog,
        Animal::Rabbit,
        Animal::Bear,
        Animal::Lion,
        Animal::Tiger,
        Animal::Elephant,
        Animal::Panda,
        Animal::Fox,
        Animal::Wolf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Animal::Cat => "cat",
            Animal::Dog => "dog",
            Animal::Rabbit => "rabbit",
            Animal::Bear => "bear",
            Animal::Lion => "lion",
            Animal::Tiger => "tiger",
            Animal::Elephant => "elephant",
            Animal::Panda => "panda",
            Animal::Fox => "fox",
            Animal::Wolf => "wolf",
        }
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Animal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Animal::ALL
            .iter()
            .find(|animal| animal.as_str() == s)
            .copied()
            .ok_or_else(|| Error::Validation(format!("Unknown animal: {}", s)))
    }
}

/// Incoming body for `POST /api/generate`.
///
/// Both fields are optional at the serde layer so an absent key reports the
/// same validation failure as an empty value instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub phrase: Option<String>,
    #[serde(default)]
    pub animal: Option<String>,
}

/// A request that passed input validation. The phrase is trimmed.
#[derive(Debug, Clone)]
pub struct ValidGeneration {
    pub phrase: String,
    pub animal: Animal,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<ValidGeneration> {
        let phrase = self.phrase.as_deref().unwrap_or("").trim();
        let animal = self.animal.as_deref().unwrap_or("").trim();

        if phrase.is_empty() || animal.is_empty() {
            return Err(Error::Validation(
                "Phrase and animal are required".to_string(),
            ));
        }

        if phrase.chars().count() > MAX_PHRASE_LEN {
            return Err(Error::Validation(format!(
                "Phrase must be at most {} characters",
                MAX_PHRASE_LEN
            )));
        }

        Ok(ValidGeneration {
            phrase: phrase.to_string(),
            animal: animal.parse()?,
        })
    }
}

/// Successful response body for `POST /api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Failure response body for `POST /api/generate` (both 400 and 500).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Missing tokens fail at the provider boundary per request, not at
    /// startup, so a freshly deployed server still serves its page.
    pub replicate_api_token: Option<String>,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let replicate_api_token = std::env::var("REPLICATE_API_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(addr) => addr
                .parse()
                .map_err(|_| Error::Config(format!("Invalid BIND_ADDR: {}", addr)))?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        Ok(Self {
            replicate_api_token,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animal_serialization() {
        let json = serde_json::to_string(&Animal::Panda).unwrap();
        assert_eq!(json, "\"panda\"");

        let deserialized: Animal = serde_json::from_str("\"fox\"").unwrap();
        assert_eq!(deserialized, Animal::Fox);
    }

    #[test]
    fn test_animal_from_str_round_trips_all() {
        for animal in Animal::ALL {
            assert_eq!(animal.as_str().parse::<Animal>().unwrap(), animal);
        }
    }

    #[test]
    fn test_animal_from_str_unknown() {
        let err = "dragon".parse::<Animal>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown animal: dragon");
    }

    fn request(phrase: Option<&str>, animal: Option<&str>) -> GenerateRequest {
        GenerateRequest {
            phrase: phrase.map(str::to_string),
            animal: animal.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_accepts_and_trims() {
        let valid = request(Some("  YOLO "), Some("cat")).validate().unwrap();
        assert_eq!(valid.phrase, "YOLO");
        assert_eq!(valid.animal, Animal::Cat);
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        for req in [
            request(None, None),
            request(None, Some("dog")),
            request(Some("YOLO"), None),
            request(Some(""), Some("dog")),
            request(Some("   "), Some("dog")),
            request(Some("YOLO"), Some("")),
        ] {
            let err = req.validate().unwrap_err();
            assert_eq!(err.to_string(), "Phrase and animal are required");
        }
    }

    #[test]
    fn test_validate_phrase_length_boundary() {
        let at_cap = "x".repeat(MAX_PHRASE_LEN);
        assert!(request(Some(&at_cap), Some("cat")).validate().is_ok());

        let over_cap = "x".repeat(MAX_PHRASE_LEN + 1);
        let err = request(Some(&over_cap), Some("cat")).validate().unwrap_err();
        assert_eq!(err.to_string(), "Phrase must be at most 50 characters");
    }

    #[test]
    fn test_validate_rejects_unknown_animal() {
        let err = request(Some("YOLO"), Some("unicorn"))
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown animal: unicorn");
    }

    #[test]
    fn test_generate_response_wire_field() {
        let response = GenerateResponse {
            image_url: "https://replicate.delivery/out.jpg".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"imageUrl\""));
    }
}
