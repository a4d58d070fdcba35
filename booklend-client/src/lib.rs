//! Клиентская библиотека для работы с booklend-server по HTTP.
//!
//! Клиент хранит JWT-токен после `register`/`login` и автоматически использует
//! его в защищённых операциях; все операции, кроме регистрации и входа,
//! требуют токен.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{LendClientError, LendClientResult};
pub use models::{AccountView, AuthResponse, ListPostsResponse, Post, User};

use http_client::HttpClient;
use uuid::Uuid;

#[derive(Debug, Clone)]
/// Клиент для работы с сервисом обмена книгами.
pub struct LendClient {
    http_client: HttpClient,
    token: Option<String>,
}

impl LendClient {
    /// Создаёт клиент с базовым URL сервера, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(base_url),
            token: None,
        }
    }

    /// Устанавливает JWT-токен вручную.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий JWT-токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый JWT-токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Завершает сессию на стороне клиента: сервер stateless, поэтому
    /// logout — это просто удаление токена.
    pub fn logout(&mut self) {
        self.clear_token();
    }

    /// Регистрирует пользователя и сохраняет полученный JWT-токен в клиенте.
    pub async fn register(
        &mut self,
        username: &str,
        password: &str,
    ) -> LendClientResult<AuthResponse> {
        let result = self.http_client.register(username, password).await?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    /// Выполняет вход пользователя и сохраняет полученный JWT-токен в клиенте.
    pub async fn login(&mut self, username: &str, password: &str) -> LendClientResult<AuthResponse> {
        let result = self.http_client.login(username, password).await?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    /// Создаёт объявление о книге.
    ///
    /// Требует установленный JWT-токен.
    pub async fn create_post(
        &self,
        title: &str,
        author: &str,
        description: &str,
    ) -> LendClientResult<Post> {
        let token = self.require_token()?;
        self.http_client
            .create_post(token, title, author, description)
            .await
    }

    /// Возвращает пост по идентификатору.
    ///
    /// Требует установленный JWT-токен.
    pub async fn get_post(&self, id: Uuid) -> LendClientResult<Post> {
        let token = self.require_token()?;
        self.http_client.get_post(token, id).await
    }

    /// Отмечает интерес к посту и возвращает новое значение счётчика.
    ///
    /// Требует установленный JWT-токен. Свой пост отметить нельзя, повторная
    /// отметка отклоняется сервером.
    pub async fn like_post(&self, id: Uuid) -> LendClientResult<u32> {
        let token = self.require_token()?;
        self.http_client.like_post(token, id).await
    }

    /// Удаляет свой пост по идентификатору.
    ///
    /// Требует установленный JWT-токен.
    pub async fn delete_post(&self, id: Uuid) -> LendClientResult<()> {
        let token = self.require_token()?;
        self.http_client.delete_post(token, id).await
    }

    /// Возвращает список постов; `search` фильтрует по подстроке в названии,
    /// авторе, описании или имени владельца.
    ///
    /// Требует установленный JWT-токен.
    pub async fn list_posts(&self, search: Option<&str>) -> LendClientResult<ListPostsResponse> {
        let token = self.require_token()?;
        self.http_client.list_posts(token, search).await
    }

    /// Возвращает страницу аккаунта текущего пользователя.
    ///
    /// Требует установленный JWT-токен.
    pub async fn account(&self) -> LendClientResult<AccountView> {
        let token = self.require_token()?;
        self.http_client.account(token).await
    }

    /// Устанавливает email текущего пользователя.
    ///
    /// Требует установленный JWT-токен.
    pub async fn update_email(&self, email: &str) -> LendClientResult<()> {
        let token = self.require_token()?;
        self.http_client.update_email(token, email).await
    }

    fn require_token(&self) -> LendClientResult<&str> {
        self.token.as_deref().ok_or(LendClientError::Unauthorized)
    }
}
