use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable unique identifier used in resource URLs.
///
/// Only ASCII letters, digits, `-` and `_` are accepted so a slug can be
/// placed in a path segment without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug cannot be empty")]
    Empty,
    #[error("slug contains invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

impl Slug {
    pub fn parse(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SlugError::Empty);
        }
        if let Some((position, character)) = value
            .chars()
            .enumerate()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SlugError::InvalidCharacter {
                character,
                position,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_slugs() {
        for s in ["jazz-night", "open_air_2025", "a"] {
            assert_eq!(Slug::parse(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn rejects_path_characters() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
        assert_eq!(
            Slug::parse("../admin"),
            Err(SlugError::InvalidCharacter {
                character: '.',
                position: 0
            })
        );
        assert!(Slug::parse("jazz night").is_err());
        assert!(Slug::parse("a/b").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let slug: Slug = serde_json::from_str(r#""rock-fest""#).unwrap();
        assert_eq!(slug.to_string(), "rock-fest");
        assert!(serde_json::from_str::<Slug>(r#""rock fest""#).is_err());
    }
}
