use std::fmt;

use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: uuid::Uuid,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Token verification failures, distinguishable by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The token was well-formed and correctly signed, but its `exp` claim has passed.
    Expired,
    /// The token was malformed, or its signature did not verify.
    Invalid,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Expired => write!(f, "Token has expired"),
            TokenError::Invalid => write!(f, "Invalid token"),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

/// Token-encoding collaborator injected into the authenticate use-case and
/// the request middleware.
pub trait TokenCodec: Send + Sync {
    /// Signs the claims into a token string. When `exp` is unset (zero), the
    /// codec injects one from its configured expiration window.
    fn encode(&self, claims: Claims) -> Result<String, AppError>;

    /// Verifies a token and returns its claims.
    fn decode(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HS256 JWT codec over the `jsonwebtoken` crate.
pub struct JwtCodec {
    secret: String,
    expiration_minutes: i64,
}

impl JwtCodec {
    pub fn new(secret: String, expiration_minutes: i64) -> Self {
        Self {
            secret,
            expiration_minutes,
        }
    }
}

impl TokenCodec for JwtCodec {
    fn encode(&self, mut claims: Claims) -> Result<String, AppError> {
        if claims.exp == 0 {
            claims.exp = chrono::Utc::now()
                .checked_add_signed(chrono::Duration::minutes(self.expiration_minutes))
                .map_or(0, |expires| expires.timestamp()) as usize;
        }

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
    }
}
