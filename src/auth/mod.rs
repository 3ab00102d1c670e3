//! Authentication module
//!
//! Email/password authentication with bcrypt credential hashing and
//! HS256 JWT access tokens.

mod jwt;
mod service;

pub use jwt::{generate_access_token, get_user_id_from_claims, verify_token, Claims};
pub use service::{AuthError, AuthService};
