use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::post::{CreatePostRequest, Post};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1, max = 255))]
    pub(crate) author: String,
    #[validate(length(min = 1, max = 4000))]
    pub(crate) description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct SearchQuery {
    #[validate(length(max = 255))]
    pub(crate) search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) description: String,
    pub(crate) owner_id: Uuid,
    pub(crate) owner_username: String,
    pub(crate) wanted: u32,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) posts: Vec<PostDto>,
    pub(crate) total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LikeResponseDto {
    pub(crate) wanted: u32,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: post.author,
            description: post.description,
            owner_id: post.owner_id,
            owner_username: post.owner_username,
            wanted: post.wanted,
            created_at: post.created_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("search" = Option<String>, Query, description = "Substring to match against title, author, description or owner name")
    ),
    responses(
        (status = 200, description = "Posts listed", body = ListPostsResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    query.validate()?;
    let term = query.search.unwrap_or_default();

    let posts = state.lending_service.search_posts(&term).await?;
    let posts: Vec<PostDto> = posts.into_iter().map(PostDto::from).collect();
    let total = posts.len();

    Ok((
        StatusCode::OK,
        Json(ListPostsResponseDto { posts, total }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let result = state.lending_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.title,
        author: dto.author,
        description: dto.description,
    };

    let result = state
        .lending_service
        .create_post(auth.user_id, &auth.username, req)
        .await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(result))))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.lending_service.delete_post(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/like",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Like recorded", body = LikeResponseDto),
        (status = 400, description = "Own post or already liked"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn like_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<LikeResponseDto>)> {
    let wanted = state.lending_service.like_post(auth.user_id, id).await?;

    Ok((StatusCode::OK, Json(LikeResponseDto { wanted })))
}
