use reqwest::{Client, Method};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use uuid::Uuid;

use crate::error::{LendClientError, LendClientResult};
use crate::models::{AccountView, AuthResponse, ListPostsResponse, Post, User};

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct CreatePostRequestDto<'a> {
    title: &'a str,
    author: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateEmailRequestDto<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthResponseDto {
    access_token: String,
    user: UserDto,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    id: Uuid,
    username: String,
    email: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
struct PostDto {
    id: Uuid,
    title: String,
    author: String,
    description: String,
    owner_id: Uuid,
    owner_username: String,
    wanted: u32,
    created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
struct ListPostsResponseDto {
    posts: Vec<PostDto>,
    total: usize,
}

#[derive(Debug, Deserialize)]
struct LikeResponseDto {
    wanted: u32,
}

#[derive(Debug, Deserialize)]
struct AccountViewDto {
    username: String,
    email: Option<String>,
    sent_posts: Vec<PostDto>,
    liked_posts: Vec<PostDto>,
}

#[derive(Serialize)]
struct ListPostsQuery<'a> {
    search: Option<&'a str>,
}

impl From<UserDto> for User {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            username: value.username,
            email: value.email,
            created_at: value.created_at,
        }
    }
}

impl From<AuthResponseDto> for AuthResponse {
    fn from(value: AuthResponseDto) -> Self {
        Self {
            access_token: value.access_token,
            user: value.user.into(),
        }
    }
}

impl From<PostDto> for Post {
    fn from(value: PostDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            description: value.description,
            owner_id: value.owner_id,
            owner_username: value.owner_username,
            wanted: value.wanted,
            created_at: value.created_at,
        }
    }
}

impl From<ListPostsResponseDto> for ListPostsResponse {
    fn from(value: ListPostsResponseDto) -> Self {
        Self {
            posts: value.posts.into_iter().map(Post::from).collect(),
            total: value.total,
        }
    }
}

impl From<AccountViewDto> for AccountView {
    fn from(value: AccountViewDto) -> Self {
        Self {
            username: value.username,
            email: value.email,
            sent_posts: value.sent_posts.into_iter().map(Post::from).collect(),
            liked_posts: value.liked_posts.into_iter().map(Post::from).collect(),
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST API `booklend-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> LendClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        LendClientError::from_http_status(status, Some(message))
    }

    /// универсальный helper для отправки запросов с json-payload
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> LendClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);

        let mut request = self.client.request(method, url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(LendClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(LendClientError::from_reqwest)
    }

    /// Регистрирует пользователя и возвращает JWT + данные пользователя.
    pub async fn register(&self, username: &str, password: &str) -> LendClientResult<AuthResponse> {
        let payload = RegisterRequestDto { username, password };
        let dto: AuthResponseDto = self
            .send_json(Method::POST, "/api/auth/register", &payload, None)
            .await?;
        Ok(dto.into())
    }

    /// Выполняет авторизацию пользователя и возвращает JWT + данные пользователя.
    pub async fn login(&self, username: &str, password: &str) -> LendClientResult<AuthResponse> {
        let payload = LoginRequestDto { username, password };
        let dto: AuthResponseDto = self
            .send_json(Method::POST, "/api/auth/login", &payload, None)
            .await?;
        Ok(dto.into())
    }

    /// Создаёт пост от имени авторизованного пользователя.
    ///
    /// Требует валидный JWT-токен.
    pub async fn create_post(
        &self,
        token: &str,
        title: &str,
        author: &str,
        description: &str,
    ) -> LendClientResult<Post> {
        let payload = CreatePostRequestDto {
            title,
            author,
            description,
        };
        let dto: PostDto = self
            .send_json(Method::POST, "/api/posts", &payload, Some(token))
            .await?;

        Ok(dto.into())
    }

    /// Получает пост по идентификатору.
    pub async fn get_post(&self, token: &str, id: Uuid) -> LendClientResult<Post> {
        let url = self.endpoint(&format!("/api/posts/{id}"));

        let request = self.client.request(Method::GET, url).bearer_auth(token);

        let response = request.send().await.map_err(LendClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let dto = response
            .json::<PostDto>()
            .await
            .map_err(LendClientError::from_reqwest)?;
        Ok(dto.into())
    }

    /// Отмечает интерес к посту и возвращает новое значение счётчика.
    ///
    /// Требует валидный JWT-токен.
    pub async fn like_post(&self, token: &str, id: Uuid) -> LendClientResult<u32> {
        let url = self.endpoint(&format!("/api/posts/{id}/like"));

        let request = self.client.request(Method::POST, url).bearer_auth(token);

        let response = request.send().await.map_err(LendClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let dto = response
            .json::<LikeResponseDto>()
            .await
            .map_err(LendClientError::from_reqwest)?;
        Ok(dto.wanted)
    }

    /// Удаляет пост по идентификатору.
    ///
    /// Требует валидный JWT-токен.
    pub async fn delete_post(&self, token: &str, id: Uuid) -> LendClientResult<()> {
        let url = self.endpoint(&format!("/api/posts/{id}"));

        let request = self.client.request(Method::DELETE, url).bearer_auth(token);

        let response = request.send().await.map_err(LendClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(())
    }

    /// Возвращает список постов; `search` фильтрует по подстроке.
    pub async fn list_posts(
        &self,
        token: &str,
        search: Option<&str>,
    ) -> LendClientResult<ListPostsResponse> {
        let url = self.endpoint("/api/posts");

        let query = ListPostsQuery { search };

        let request = self
            .client
            .request(Method::GET, url)
            .query(&query)
            .bearer_auth(token);

        let response = request.send().await.map_err(LendClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let dto = response
            .json::<ListPostsResponseDto>()
            .await
            .map_err(LendClientError::from_reqwest)?;
        Ok(dto.into())
    }

    /// Возвращает страницу аккаунта текущего пользователя.
    pub async fn account(&self, token: &str) -> LendClientResult<AccountView> {
        let url = self.endpoint("/api/account");

        let request = self.client.request(Method::GET, url).bearer_auth(token);

        let response = request.send().await.map_err(LendClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let dto = response
            .json::<AccountViewDto>()
            .await
            .map_err(LendClientError::from_reqwest)?;
        Ok(dto.into())
    }

    /// Устанавливает email текущего пользователя.
    ///
    /// Требует валидный JWT-токен.
    pub async fn update_email(&self, token: &str, email: &str) -> LendClientResult<()> {
        let url = self.endpoint("/api/account/email");
        let payload = UpdateEmailRequestDto { email };

        let request = self
            .client
            .request(Method::PUT, url)
            .json(&payload)
            .bearer_auth(token);

        let response = request.send().await.map_err(LendClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(())
    }
}
