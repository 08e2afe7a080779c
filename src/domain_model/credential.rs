use std::fmt;

/// Short-lived bearer credential attached to API calls.
///
/// `Debug` redacts the value so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

/// Longer-lived credential used only to obtain a new [`AccessToken`].
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

macro_rules! opaque_token {
    ($name:ident) => {
        impl $name {
            pub fn new(token: impl Into<String>) -> Self {
                Self(token.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&"[REDACTED]").finish()
            }
        }
    };
}

opaque_token!(AccessToken);
opaque_token!(RefreshToken);

/// Access and refresh token held together. Either both exist or the
/// session is logged out; there is no way to build a pair with one half.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPair {
    access: AccessToken,
    refresh: RefreshToken,
}

impl CredentialPair {
    pub fn new(access: AccessToken, refresh: RefreshToken) -> Self {
        Self { access, refresh }
    }

    /// Build a pair from raw strings, rejecting empty halves.
    pub fn from_parts(access: Option<String>, refresh: Option<String>) -> Option<Self> {
        match (access, refresh) {
            (Some(access), Some(refresh)) if !access.is_empty() && !refresh.is_empty() => {
                Some(Self::new(AccessToken(access), RefreshToken(refresh)))
            }
            _ => None,
        }
    }

    pub fn access(&self) -> &AccessToken {
        &self.access
    }

    pub fn refresh(&self) -> &RefreshToken {
        &self.refresh
    }

    /// Same refresh token, new access token.
    pub fn with_access(&self, access: AccessToken) -> Self {
        Self {
            access,
            refresh: self.refresh.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_tokens() {
        let pair = CredentialPair::new(AccessToken::new("secret-a"), RefreshToken::new("secret-r"));
        let printed = format!("{:?}", pair);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("[REDACTED]"));
    }

    #[test]
    fn from_parts_requires_both_halves() {
        assert!(CredentialPair::from_parts(Some("a".into()), None).is_none());
        assert!(CredentialPair::from_parts(None, Some("r".into())).is_none());
        assert!(CredentialPair::from_parts(Some("".into()), Some("r".into())).is_none());
        let pair = CredentialPair::from_parts(Some("a".into()), Some("r".into())).unwrap();
        assert_eq!(pair.access().as_str(), "a");
        assert_eq!(pair.refresh().as_str(), "r");
    }

    #[test]
    fn with_access_keeps_refresh_token() {
        let pair = CredentialPair::new(AccessToken::new("old"), RefreshToken::new("r"));
        let next = pair.with_access(AccessToken::new("new"));
        assert_eq!(next.access().as_str(), "new");
        assert_eq!(next.refresh(), pair.refresh());
    }
}
