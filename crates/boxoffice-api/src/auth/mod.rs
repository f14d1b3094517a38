//! Bearer token verification. Tokens are issued by an external identity
//! service; this crate only checks them.

pub mod claims;
pub mod verifier;

pub use claims::Claims;
pub use verifier::JwtVerifier;
