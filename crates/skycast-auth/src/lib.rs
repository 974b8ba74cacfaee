//! Authentication primitives for the weather service: password hashing and
//! stateless session tokens.

pub mod jwt;
pub mod password;

pub use jwt::{JwtError, JwtValidator, SessionClaims, DEFAULT_TOKEN_VALIDITY_HOURS};
pub use password::{hash_password, verify_password, PasswordError};
