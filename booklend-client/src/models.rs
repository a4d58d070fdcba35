use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель пользователя.
pub struct User {
    /// Идентификатор пользователя.
    pub id: Uuid,
    /// Логин.
    pub username: String,
    /// Email; отсутствует, пока пользователь его не указал.
    pub email: Option<String>,
    /// Дата и время создания пользователя (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель поста — объявления о книге.
pub struct Post {
    /// Идентификатор поста.
    pub id: Uuid,
    /// Название книги.
    pub title: String,
    /// Автор книги.
    pub author: String,
    /// Описание экземпляра.
    pub description: String,
    /// Идентификатор владельца.
    pub owner_id: Uuid,
    /// Отображаемое имя владельца.
    pub owner_username: String,
    /// Сколько пользователей отметили интерес.
    pub wanted: u32,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ после успешной регистрации или входа.
pub struct AuthResponse {
    /// JWT access token.
    pub access_token: String,
    /// Данные пользователя.
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ списка постов.
pub struct ListPostsResponse {
    /// Найденные посты.
    pub posts: Vec<Post>,
    /// Количество найденных постов.
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Страница аккаунта: свои объявления и отмеченные посты.
pub struct AccountView {
    /// Логин.
    pub username: String,
    /// Email; отсутствует, пока не указан.
    pub email: Option<String>,
    /// Посты, которые пользователь выложил.
    pub sent_posts: Vec<Post>,
    /// Посты, которые пользователь отметил (удалённые уже отфильтрованы).
    pub liked_posts: Vec<Post>,
}
