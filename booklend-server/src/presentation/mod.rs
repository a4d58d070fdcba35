use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::lending_service::LendingService;
use crate::data::repositories::memory::post_repository::MemoryPostRepository;
use crate::data::repositories::memory::user_repository::MemoryUserRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<MemoryUserRepository>>,
    pub(crate) lending_service: Arc<LendingService<MemoryPostRepository, MemoryUserRepository>>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<MemoryUserRepository>>,
        lending_service: Arc<LendingService<MemoryPostRepository, MemoryUserRepository>>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            auth_service,
            lending_service,
            jwt,
        }
    }
}
