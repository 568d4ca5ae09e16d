use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::net::TcpListener;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use account_service::auth::handlers::{login, refresh};
use account_service::users::handlers::{
    create_user, delete_user, get_all_users, get_user_by_id, update_user,
};
use account_service::{health_check, AppError, AppState, Settings};

#[actix_web::main]
async fn main() -> account_service::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();

    // Load configuration; missing secrets fail here, before any request
    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    info!(
        "Starting server at {}:{}",
        config.server.host, config.server.port
    );

    // Initialize application state
    let state = AppState::new(config.clone()).await?;
    let state = web::Data::new(state);

    // Periodically evict rate-limit counters whose window has elapsed
    let limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(300)).await;
            limiter.sweep().await;
        }
    });

    // Create and bind TCP listener
    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(state.clone())
            .route("/api/v1/health", web::get().to(health_check))
            .service(
                web::scope("/api/v1/auth")
                    .route("/login", web::post().to(login))
                    .route("/refresh", web::post().to(refresh)),
            )
            .service(
                web::scope("/api/v1/user")
                    .route("/create", web::post().to(create_user))
                    .route("/getAll", web::get().to(get_all_users))
                    .route("/getById/{userId}", web::get().to(get_user_by_id))
                    .route("/update", web::put().to(update_user))
                    .route("/delete/{userId}", web::delete().to(delete_user)),
            )
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}
