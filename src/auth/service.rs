use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::password::PasswordHasher;
use crate::db::store::UserStore;
use crate::error::AppError;

pub const ACCESS_TOKEN_MINUTES: i64 = 5;
pub const REFRESH_TOKEN_MINUTES: i64 = 60;

/// Claims carried by the short-lived access token. Stateless: validity is a
/// function of signature and expiry only.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: String,
    pub user_name: String,
    pub email_address: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by the refresh token. Only the user id; the access token
/// is rebuilt from current record state on renewal.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub user_id: String,
    pub iat: i64,
    pub exp: i64,
}

/// Outcome of credential verification. Never carries password material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub user_id: String,
    pub user_name: String,
    pub email_address: String,
}

#[derive(Debug)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and verifies both token kinds with two independent secrets.
pub struct TokenSigner {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl TokenSigner {
    pub fn new(access_secret: &str, refresh_secret: &str) -> Result<Self, AppError> {
        if access_secret.is_empty() || refresh_secret.is_empty() {
            return Err(AppError::ConfigError("JWT secrets are not set".into()));
        }

        Ok(Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
        })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; the lifetimes are short enough that clock leeway
        // would blur the contract.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }

    pub fn sign_access(
        &self,
        identity: &VerifiedIdentity,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = AccessClaims {
            user_id: identity.user_id.clone(),
            user_name: identity.user_name.clone(),
            email_address: identity.email_address.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ACCESS_TOKEN_MINUTES)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.access_encoding)
            .map_err(|e| AppError::InternalError(format!("access token signing failed: {}", e)))
    }

    pub fn sign_refresh(&self, user_id: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = RefreshClaims {
            user_id: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(REFRESH_TOKEN_MINUTES)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.refresh_encoding)
            .map_err(|e| AppError::InternalError(format!("refresh token signing failed: {}", e)))
    }

    pub fn decode_access(&self, token: &str) -> Result<AccessClaims, AppError> {
        decode::<AccessClaims>(token, &self.access_decoding, &Self::validation())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid access token.".into()))
    }

    pub fn decode_refresh(&self, token: &str) -> Result<RefreshClaims, AppError> {
        decode::<RefreshClaims>(token, &self.refresh_decoding, &Self::validation())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid refresh token.".into()))
    }
}

/// Credential verification and token lifecycle. Stateless across requests;
/// everything is either in the call or fetched fresh from the store.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    signer: TokenSigner,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, signer: TokenSigner, hasher: PasswordHasher) -> Self {
        Self {
            store,
            signer,
            hasher,
        }
    }

    /// Checks the pair against the active record for `user_name`. Empty input
    /// fails before any store access.
    pub async fn verify_credentials(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<VerifiedIdentity, AppError> {
        if user_name.is_empty() || password.is_empty() {
            return Err(AppError::BadRequest(
                "Username and password are required.".into(),
            ));
        }

        let user = self
            .store
            .find_active_by_username(user_name)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found or inactive".into()))?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Invalid Password!".into()));
        }

        Ok(VerifiedIdentity {
            user_id: user.user_id,
            user_name: user.user_name,
            email_address: user.email_address,
        })
    }

    /// Produces the access/refresh pair for a verified identity.
    pub fn issue_session(&self, identity: &VerifiedIdentity) -> Result<SessionTokens, AppError> {
        let now = Utc::now();
        Ok(SessionTokens {
            access_token: self.signer.sign_access(identity, now)?,
            refresh_token: self.signer.sign_refresh(&identity.user_id, now)?,
        })
    }

    pub async fn login(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<SessionTokens, AppError> {
        let identity = self.verify_credentials(user_name, password).await?;
        self.issue_session(&identity)
    }

    /// Exchanges a still-valid refresh token for a fresh access token. The
    /// identity is re-fetched so the new token reflects current record state,
    /// not the claims frozen at refresh-token issuance. The refresh token
    /// itself is not rotated.
    pub async fn renew_access(&self, refresh_token: Option<&str>) -> Result<String, AppError> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Refresh Token not provided.".into()))?;

        let claims = self.signer.decode_refresh(token)?;

        let user = self
            .store
            .find_by_user_id(&claims.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("User not found or invalid refresh token.".into())
            })?;

        let identity = VerifiedIdentity {
            user_id: user.user_id,
            user_name: user.user_name,
            email_address: user.email_address,
        };
        self.signer.sign_access(&identity, Utc::now())
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }
}
