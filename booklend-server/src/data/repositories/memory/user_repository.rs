use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::User;

/// In-memory `users` collection: one document per user behind an async
/// `RwLock`, documents cloned on read. The password hash stays inside the
/// document and only leaves through `UserCredentials`.
#[derive(Debug, Clone)]
pub(crate) struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, UserDocument>>>,
}

#[derive(Debug, Clone)]
struct UserDocument {
    id: Uuid,
    username: String,
    password_hash: String,
    email: Option<String>,
    sent_posts: Vec<Uuid>,
    liked_posts: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl UserDocument {
    fn to_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            sent_posts: self.sent_posts.clone(),
            liked_posts: self.liked_posts.clone(),
            created_at: self.created_at,
        }
    }
}

impl MemoryUserRepository {
    pub(crate) fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn user_not_found(id: Uuid) -> DomainError {
    DomainError::NotFound(format!("user id: {id}"))
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|doc| doc.username == input.username) {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }

        let doc = UserDocument {
            id: Uuid::new_v4(),
            username: input.username,
            password_hash: input.password_hash,
            email: None,
            sent_posts: Vec::new(),
            liked_posts: Vec::new(),
            created_at: Utc::now(),
        };
        let user = doc.to_user();
        users.insert(doc.id, doc);
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|doc| doc.username == username)
            .map(|doc| UserCredentials {
                user: doc.to_user(),
                password_hash: doc.password_hash.clone(),
            }))
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).map(UserDocument::to_user))
    }

    async fn update_email(&self, id: Uuid, email: &str) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let doc = users.get_mut(&id).ok_or_else(|| user_not_found(id))?;
        doc.email = Some(email.to_string());
        Ok(())
    }

    async fn add_sent_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let doc = users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        doc.sent_posts.push(post_id);
        Ok(())
    }

    async fn remove_sent_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let doc = users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        doc.sent_posts.retain(|id| *id != post_id);
        Ok(())
    }

    async fn add_liked_post(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        let doc = users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        if doc.liked_posts.contains(&post_id) {
            return Ok(false);
        }
        doc.liked_posts.push(post_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "$argon2id$fake-hash".to_string(),
        }
    }

    #[tokio::test]
    async fn create_user_assigns_id_and_empty_lists() {
        let repo = MemoryUserRepository::new();
        let user = repo
            .create_user(new_user("lender"))
            .await
            .expect("create must succeed");

        assert_eq!(user.username, "lender");
        assert!(user.email.is_none());
        assert!(user.sent_posts.is_empty());
        assert!(user.liked_posts.is_empty());
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_username() {
        let repo = MemoryUserRepository::new();
        repo.create_user(new_user("lender"))
            .await
            .expect("first create must succeed");

        let err = repo
            .create_user(new_user("lender"))
            .await
            .expect_err("duplicate username must be rejected");
        assert!(matches!(err, DomainError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn find_by_username_exposes_stored_hash() {
        let repo = MemoryUserRepository::new();
        repo.create_user(new_user("lender"))
            .await
            .expect("create must succeed");

        let creds = repo
            .find_by_username("lender")
            .await
            .expect("lookup must succeed")
            .expect("user must exist");
        assert_eq!(creds.password_hash, "$argon2id$fake-hash");

        let missing = repo
            .find_by_username("nobody")
            .await
            .expect("lookup must succeed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn add_liked_post_has_set_semantics() {
        let repo = MemoryUserRepository::new();
        let user = repo
            .create_user(new_user("reader"))
            .await
            .expect("create must succeed");
        let post_id = Uuid::new_v4();

        assert!(
            repo.add_liked_post(user.id, post_id)
                .await
                .expect("append must succeed")
        );
        assert!(
            !repo
                .add_liked_post(user.id, post_id)
                .await
                .expect("second append must not fail")
        );

        let stored = repo
            .get_user(user.id)
            .await
            .expect("lookup must succeed")
            .expect("user must exist");
        assert_eq!(stored.liked_posts, vec![post_id]);
    }

    #[tokio::test]
    async fn remove_sent_post_ignores_absent_ids() {
        let repo = MemoryUserRepository::new();
        let user = repo
            .create_user(new_user("lender"))
            .await
            .expect("create must succeed");
        let kept = Uuid::new_v4();

        repo.add_sent_post(user.id, kept)
            .await
            .expect("append must succeed");
        repo.remove_sent_post(user.id, Uuid::new_v4())
            .await
            .expect("absent id removal must be a no-op");

        let stored = repo
            .get_user(user.id)
            .await
            .expect("lookup must succeed")
            .expect("user must exist");
        assert_eq!(stored.sent_posts, vec![kept]);
    }

    #[tokio::test]
    async fn mutations_on_missing_user_report_not_found() {
        let repo = MemoryUserRepository::new();
        let missing = Uuid::new_v4();

        let err = repo
            .update_email(missing, "a@example.com")
            .await
            .expect_err("missing user must be reported");
        assert!(matches!(err, DomainError::NotFound(_)));

        let err = repo
            .add_liked_post(missing, Uuid::new_v4())
            .await
            .expect_err("missing user must be reported");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_email_overwrites_previous_value() {
        let repo = MemoryUserRepository::new();
        let user = repo
            .create_user(new_user("lender"))
            .await
            .expect("create must succeed");

        repo.update_email(user.id, "old@example.com")
            .await
            .expect("update must succeed");
        repo.update_email(user.id, "new@example.com")
            .await
            .expect("update must succeed");

        let stored = repo
            .get_user(user.id)
            .await
            .expect("lookup must succeed")
            .expect("user must exist");
        assert_eq!(stored.email.as_deref(), Some("new@example.com"));
    }
}
