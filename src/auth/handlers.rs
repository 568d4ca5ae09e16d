use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/v1/auth/login
///
/// Verifies the credential pair, then returns the access token in the body
/// and the refresh token in the session cookie.
pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Login request for user: {}", req.user_name);

    let tokens = state
        .auth
        .login(&req.user_name, &req.password)
        .await
        .map_err(|e| {
            warn!("Login failed for {}: {}", req.user_name, e);
            e
        })?;

    info!("Login successful for user: {}", req.user_name);
    Ok(HttpResponse::Ok()
        .cookie(state.cookies.build(tokens.refresh_token))
        .json(ApiResponse::with_token(
            "Login Successful",
            "User logged in successfully",
            tokens.access_token,
        )))
}

/// POST /api/v1/auth/refresh
///
/// No body; reads the refresh cookie and answers with a new access token.
/// The cookie is left as-is: the refresh token is not rotated here.
pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = state.cookies.extract(&req);

    let access_token = state
        .auth
        .renew_access(refresh_token.as_deref())
        .await
        .map_err(|e| {
            warn!("Refresh rejected: {}", e);
            e
        })?;

    info!("Access token renewed");
    Ok(HttpResponse::Ok().json(ApiResponse::with_token(
        "Refresh successful",
        "New access token generated.",
        access_token,
    )))
}
