use axum::Router;
use axum::middleware;
use axum::routing::{get, put};

use crate::presentation::AppState;
use crate::presentation::handlers::account::{account_view, update_email};
use crate::presentation::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(account_view))
        .route("/email", put(update_email))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
