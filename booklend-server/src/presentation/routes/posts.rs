use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, like_post, list_posts,
};
use crate::presentation::middleware::auth::jwt_auth_middleware;

// Browsing requires a session too: every screen sits behind login.
pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}", get(get_post).delete(delete_post))
        .route("/{id}/like", post(like_post))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
