use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::lending_service::AccountView;
use crate::domain::user::UpdateEmailRequest;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::posts::PostDto;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateEmailDto {
    #[validate(email)]
    pub(crate) email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AccountViewDto {
    pub(crate) username: String,
    pub(crate) email: Option<String>,
    pub(crate) sent_posts: Vec<PostDto>,
    pub(crate) liked_posts: Vec<PostDto>,
}

impl From<AccountView> for AccountViewDto {
    fn from(view: AccountView) -> Self {
        Self {
            username: view.user.username,
            email: view.user.email,
            sent_posts: view.sent_posts.into_iter().map(PostDto::from).collect(),
            liked_posts: view.liked_posts.into_iter().map(PostDto::from).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/account",
    tag = "account",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Account view", body = AccountViewDto),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn account_view(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<(StatusCode, Json<AccountViewDto>)> {
    let view = state.lending_service.account_view(auth.user_id).await?;

    Ok((StatusCode::OK, Json(AccountViewDto::from(view))))
}

#[utoipa::path(
    put,
    path = "/api/account/email",
    tag = "account",
    security(
        ("bearer_auth" = [])
    ),
    request_body = UpdateEmailDto,
    responses(
        (status = 204, description = "Email updated"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_email(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<UpdateEmailDto>,
) -> AppResult<StatusCode> {
    dto.validate()?;

    let req = UpdateEmailRequest { email: dto.email };
    state
        .lending_service
        .update_email(auth.user_id, req)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
