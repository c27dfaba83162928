//! Signed session-token codec.
//!
//! A token carries only the subject and the last-activity timestamp. Nothing about
//! freshness is enforced here: the token has no `exp`, and [`crate::session::SessionManager`]
//! decides staleness from `last_activity`.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims payload of a session token.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | account username |
/// | `last_activity` | custom, RFC 3339 | last time a request validated this session |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
}

/// Errors returned by [`SessionCodec`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("unsupported algorithm")]
    UnsupportedAlgorithm,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Encodes and decodes session tokens with a shared secret.
#[derive(Clone)]
pub struct SessionCodec {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCodec")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl SessionCodec {
    /// Build a codec for an HMAC algorithm. Asymmetric algorithms need key pairs, not a
    /// shared secret, and are rejected.
    pub fn new(secret: &str, algorithm: Algorithm) -> Result<Self, TokenError> {
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::UnsupportedAlgorithm);
        }
        Ok(Self {
            algorithm,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign a token for `subject` stamped with `last_activity`.
    pub fn issue(&self, subject: &str, last_activity: DateTime<Utc>) -> Result<String, TokenError> {
        self.encode(&SessionClaims {
            sub: subject.to_owned(),
            last_activity: Some(last_activity),
        })
    }

    pub fn encode(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Verify the signature and algorithm and return the raw claims.
    ///
    /// Only `sub` is required; `exp` is neither required nor checked.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.set_required_spec_claims(&["sub"]);

        let data = decode::<SessionClaims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                    TokenError::UnsupportedAlgorithm
                }
                _ => TokenError::Malformed,
            }
        })?;
        Ok(data.claims)
    }
}
