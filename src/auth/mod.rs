//! Authentication and session management.
//!
//! Credential verification, dual-token issuance (access + refresh),
//! refresh-token renewal, session-cookie transport and the request-rate
//! gate in front of the user-management endpoints.

pub mod cookie;
pub mod handlers;
pub mod password;
pub mod rate_limit;
pub mod service;

pub use cookie::{SessionCookieManager, REFRESH_COOKIE_NAME};
pub use password::PasswordHasher;
pub use rate_limit::{Admission, RateLimitConfig, RateLimiter, RATE_LIMIT_MESSAGE};
pub use service::{
    AccessClaims, AuthService, RefreshClaims, SessionTokens, TokenSigner, VerifiedIdentity,
};
