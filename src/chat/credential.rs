//! API credential lookup
//!
//! The key comes from the `API_KEY` environment variable: read at runtime on
//! native builds, baked in at compile time for the browser build.

use std::fmt;

use super::error::ConfigError;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "API_KEY";

/// A non-empty API key. Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::MissingCredential { var: API_KEY_VAR });
        }
        Ok(Self(key.trim().to_string()))
    }

    /// Look the key up in the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(read_env())
    }

    /// Credential from an environment lookup result; unset counts as missing
    pub fn from_lookup(value: Option<String>) -> Result<Self, ConfigError> {
        let key = value.ok_or(ConfigError::MissingCredential { var: API_KEY_VAR })?;
        Self::new(key)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(target_arch = "wasm32")]
fn read_env() -> Option<String> {
    option_env!("API_KEY").map(str::to_string)
}

#[cfg(not(target_arch = "wasm32"))]
fn read_env() -> Option<String> {
    std::env::var(API_KEY_VAR).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_missing() {
        assert_eq!(
            Credential::new("   "),
            Err(ConfigError::MissingCredential { var: API_KEY_VAR })
        );
        assert_eq!(Credential::new(" abc ").unwrap().expose(), "abc");
    }

    #[test]
    fn test_unset_key_is_missing() {
        assert_eq!(
            Credential::from_lookup(None),
            Err(ConfigError::MissingCredential { var: API_KEY_VAR })
        );
        assert_eq!(
            Credential::from_lookup(Some("\n".to_string())),
            Err(ConfigError::MissingCredential { var: API_KEY_VAR })
        );
        assert_eq!(
            Credential::from_lookup(Some("k-123".to_string())).unwrap().expose(),
            "k-123"
        );
    }

    #[test]
    fn test_debug_redacts() {
        let credential = Credential::new("secret-key").unwrap();
        assert_eq!(format!("{credential:?}"), "Credential(***)");
    }
}
