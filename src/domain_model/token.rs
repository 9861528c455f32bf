use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AccessToken(pub String);

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RefreshToken(pub String);

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: AccessToken,
    pub refresh: RefreshToken,
}

/// Read shape of the persisted pair. Both halves are independently optional;
/// absence is a valid result, not an error.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StoredTokens {
    pub access: Option<AccessToken>,
    pub refresh: Option<RefreshToken>,
}

impl From<TokenPair> for StoredTokens {
    fn from(pair: TokenPair) -> Self {
        StoredTokens {
            access: Some(pair.access),
            refresh: Some(pair.refresh),
        }
    }
}

/// Refresh endpoint response. The endpoint answers with either the short or
/// the suffixed key convention; both land on the same fields.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshGrant {
    #[serde(alias = "access_token")]
    pub access: AccessToken,
    #[serde(alias = "refresh_token")]
    pub refresh: RefreshToken,
}

impl From<RefreshGrant> for TokenPair {
    fn from(grant: RefreshGrant) -> Self {
        TokenPair {
            access: grant.access,
            refresh: grant.refresh,
        }
    }
}
