use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;

use crate::auth::service::REFRESH_TOKEN_MINUTES;

pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

/// Transports the refresh token in a protected cookie. Attributes are fixed
/// policy; only `Secure` varies with the deployment mode.
#[derive(Debug, Clone)]
pub struct SessionCookieManager {
    secure: bool,
}

impl SessionCookieManager {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn build(&self, refresh_token: String) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE_NAME, refresh_token)
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(Duration::minutes(REFRESH_TOKEN_MINUTES))
            .path("/")
            .finish()
    }

    /// Pure read; validation belongs to the refresh flow.
    pub fn extract(&self, req: &HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
    }
}
