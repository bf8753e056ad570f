//! HS256 bearer tokens carrying a credential snapshot.
//!
//! Expiry is checked against an injected [`Clock`] rather than the system
//! time that `jsonwebtoken` would otherwise consult.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenIssuer, TokenIssuerError, VerifiedToken};
use crate::domain::{Credential, UserId};

/// Lifetime of an issued token.
pub const TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: UserId,
    credentials: Vec<Credential>,
    iat: i64,
    exp: i64,
}

/// Signs and verifies tokens with a shared secret.
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Create an issuer for `secret`, reading "now" from `clock`.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn generate(
        &self,
        user_id: UserId,
        credentials: &[Credential],
    ) -> Result<String, TokenIssuerError> {
        let now = self.clock.utc();
        let claims = Claims {
            user_id,
            credentials: credentials.to_vec(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenIssuerError::signing(err.to_string()))
    }

    fn validate(&self, token: &str) -> Result<VerifiedToken, TokenIssuerError> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Self::validation())
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenIssuerError::expired(),
                _ => TokenIssuerError::invalid(err.to_string()),
            })?;
        if claims.exp < self.clock.utc().timestamp() {
            return Err(TokenIssuerError::expired());
        }
        Ok(VerifiedToken {
            user_id: claims.user_id,
            credentials: claims.credentials,
        })
    }
}
