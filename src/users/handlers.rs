use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::auth::rate_limit::{Admission, RATE_LIMIT_MESSAGE};
use crate::db::models::{NewUser, User, UserUpdate};
use crate::error::AppError;
use crate::response::ApiResponse;
use crate::AppState;

/// Every user-management endpoint shares one per-client budget, reads and
/// writes alike.
async fn admit(req: &HttpRequest, state: &AppState) -> Result<(), AppError> {
    let client = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    match state.rate_limiter.admit(&client).await {
        Admission::Allowed => Ok(()),
        Admission::Rejected { retry_after } => {
            warn!(
                "Rate limit exceeded for {} (window resets in {}s)",
                client,
                retry_after.num_seconds()
            );
            Err(AppError::RateLimited(RATE_LIMIT_MESSAGE.into()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub gender: String,
}

/// POST /api/v1/user/create
pub async fn create_user(
    req: HttpRequest,
    body: web::Json<CreateUserRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    admit(&req, &state).await?;

    let body = body.into_inner();
    let all_present = [
        &body.user_name,
        &body.first_name,
        &body.last_name,
        &body.email_address,
        &body.mobile_number,
        &body.password,
        &body.gender,
    ]
    .iter()
    .all(|field| !field.is_empty());
    if !all_present {
        return Err(AppError::BadRequest("All fields are required.".into()));
    }

    if state.store.username_exists(&body.user_name).await? {
        return Err(AppError::Conflict("Username already exists.".into()));
    }

    let password_hash = state.hasher.hash(&body.password)?;
    let user = User::new(
        NewUser {
            user_name: body.user_name,
            first_name: body.first_name,
            last_name: body.last_name,
            email_address: body.email_address,
            mobile_number: body.mobile_number,
            gender: body.gender,
        },
        password_hash,
    );
    state.store.insert_user(&user).await?;

    info!("User registered: {}", user.user_name);
    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Registration successful",
        "User registered successfully",
    )))
}

/// GET /api/v1/user/getAll
pub async fn get_all_users(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    admit(&req, &state).await?;

    let users = state.store.list_active().await?;
    if users.is_empty() {
        return Err(AppError::NotFound("Data not found.".into()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::with_data("OK", json!(users))))
}

/// GET /api/v1/user/getById/{userId}
pub async fn get_user_by_id(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    admit(&req, &state).await?;

    let user_id = path.into_inner();
    let user = state
        .store
        .find_active_by_user_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_data("OK", json!(user))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub user_id: String,
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub mobile_number: Option<String>,
    pub gender: Option<String>,
}

/// PUT /api/v1/user/update
pub async fn update_user(
    req: HttpRequest,
    body: web::Json<UpdateUserRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    admit(&req, &state).await?;

    let body = body.into_inner();
    if body.user_id.is_empty() {
        return Err(AppError::BadRequest("User ID is required.".into()));
    }

    let changes = UserUpdate {
        user_name: body.user_name,
        first_name: body.first_name,
        last_name: body.last_name,
        email_address: body.email_address,
        mobile_number: body.mobile_number,
        gender: body.gender,
    };

    let matched = state.store.update_user(&body.user_id, &changes).await?;
    if matched == 0 {
        return Err(AppError::NotFound("User not found.".into()));
    }

    info!("User updated: {}", body.user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::ok("OK", "User updated successfully.")))
}

/// DELETE /api/v1/user/delete/{userId}
pub async fn delete_user(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    admit(&req, &state).await?;

    let user_id = path.into_inner();
    if !state.store.delete_user(&user_id).await? {
        return Err(AppError::NotFound("User not found.".into()));
    }

    info!("User deleted: {}", user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::ok("OK", "User deleted successfully.")))
}
