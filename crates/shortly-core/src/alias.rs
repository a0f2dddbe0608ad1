use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A validated alias for a shortened URL.
///
/// Aliases are used verbatim as a path segment, so they must be 1-64
/// characters long and contain only alphanumeric characters, hyphens,
/// or underscores. Names that collide with fixed routes are reserved.
/// Comparison is case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alias(String);

impl Alias {
    pub const MIN_LENGTH: usize = 1;
    pub const MAX_LENGTH: usize = 64;
    /// Path segments served by fixed routes, which shadow `/{alias}`.
    pub const RESERVED: &'static [&'static str] = &["health", "url"];

    /// Creates a new `Alias` after validating the input.
    pub fn new(alias: impl Into<String>) -> Result<Self, CoreError> {
        let alias = alias.into();
        Self::validate(&alias)?;
        Ok(Self(alias))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(alias: &str) -> Result<(), CoreError> {
        if alias.len() < Self::MIN_LENGTH || alias.len() > Self::MAX_LENGTH {
            return Err(CoreError::InvalidAlias(format!(
                "length must be between {} and {}, got {}",
                Self::MIN_LENGTH,
                Self::MAX_LENGTH,
                alias.len()
            )));
        }

        if !alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::InvalidAlias(format!(
                "must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                alias
            )));
        }

        if Self::RESERVED.contains(&alias) {
            return Err(CoreError::InvalidAlias(format!("'{}' is reserved", alias)));
        }

        Ok(())
    }
}

impl Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Alias {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Alias> for String {
    fn from(alias: Alias) -> Self {
        alias.0
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
