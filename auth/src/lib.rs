//! Authentication and authorization core library
//!
//! Provides the credential and token primitives for services:
//! - Password hashing (Argon2id)
//! - Signed token issuance and validation (HS256, session and
//!   password-reset purposes)
//! - Claim-based access policy evaluation
//!
//! The library holds no server-side token state: tokens are self-contained
//! bearer credentials that die at expiry. Services layer their own lookup
//! and persistence around these primitives.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, TokenCodec};
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let claims = Claims::for_session(Uuid::new_v4(), "alice@example.com", false);
//! let token = codec.issue(&claims, Duration::minutes(120)).unwrap();
//! let decoded = codec.parse(&token).unwrap();
//! assert_eq!(decoded.sub, claims.sub);
//! ```
//!
//! ## Policies
//! ```
//! use auth::{Claims, Decision, Policy};
//! use uuid::Uuid;
//!
//! let claims = Claims::for_session(Uuid::new_v4(), "alice@example.com", true);
//! assert_eq!(Policy::Admin.evaluate(Some(&claims)), Decision::Allow);
//! assert_eq!(Policy::Admin.evaluate(None), Decision::DenyUnauthenticated);
//! ```

pub mod password;
pub mod policy;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use policy::Decision;
pub use policy::Policy;
pub use token::Claims;
pub use token::ConfigError;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenPurpose;
