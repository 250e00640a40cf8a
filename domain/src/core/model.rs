//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// Model identifiers may be written with a provider prefix
/// (`gemini/gemini-2.0-flash`); the prefix is dropped on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gemini20Flash,
    Gemini20FlashLite,
    Gemini25Flash,
    Gemini25Pro,
    Custom(String),
}

impl Model {
    /// Provider prefix accepted in front of model identifiers
    const PROVIDER_PREFIX: &'static str = "gemini/";

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Gemini20FlashLite => "gemini-2.0-flash-lite",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Custom(s) => s,
        }
    }

    /// Check if this is one of the built-in Gemini models
    pub fn is_known(&self) -> bool {
        !matches!(self, Model::Custom(_))
    }
}

impl Default for Model {
    /// Returns the default model (Gemini 2.0 Flash)
    fn default() -> Self {
        Model::Gemini20Flash
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(Self::PROVIDER_PREFIX).unwrap_or(s);
        Ok(match s {
            "gemini-2.0-flash" => Model::Gemini20Flash,
            "gemini-2.0-flash-lite" => Model::Gemini20FlashLite,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}
