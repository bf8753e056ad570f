//! Password digests and bearer tokens.

mod jwt_token_issuer;
mod salted_password_hasher;

pub use jwt_token_issuer::{JwtTokenIssuer, TOKEN_TTL_DAYS};
pub use salted_password_hasher::SaltedPasswordHasher;
