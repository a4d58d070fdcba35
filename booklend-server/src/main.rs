use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::lending_service::LendingService;
use data::repositories::memory::post_repository::MemoryPostRepository;
use data::repositories::memory::user_repository::MemoryUserRepository;
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    // Both services share the same user collection handle.
    let users = MemoryUserRepository::new();
    let posts = MemoryPostRepository::new();

    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        settings.jwt_ttl_seconds,
    ));
    let auth_service = Arc::new(AuthService::new(users.clone(), (*jwt).clone()));
    let lending_service = Arc::new(LendingService::new(posts, users));

    let state = AppState::new(auth_service, lending_service, jwt);

    info!("starting booklend-server");
    server::run_http(&settings, state).await
}
