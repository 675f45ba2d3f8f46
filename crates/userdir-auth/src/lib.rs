//! # userdir-auth
//!
//! Bearer-token plumbing for the user directory service: JWT claims,
//! encoding and verification (HS256), and Argon2id password hashing.
//!
//! Tokens are stateless; there is no server-side session store. The HTTP
//! layer treats a token that verifies as an authenticated caller.

pub mod jwt;
pub mod password;
pub mod token;

pub use jwt::claims::Claims;
pub use jwt::encoder::JwtEncoder;
pub use jwt::verifier::JwtVerifier;
pub use password::PasswordHasher;
