use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) username: String,
    pub(crate) password_hash: String,
}

/// Access interface over the `users` collection of the document store.
///
/// The store is schemaless; referential-looking invariants (unique username,
/// set semantics of the liked list) live behind this trait, not in a schema.
#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    /// Inserts a new user document. Fails with `AlreadyExists` when the
    /// username is taken.
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError>;

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    async fn update_email(&self, id: Uuid, email: &str) -> Result<(), DomainError>;

    /// Appends a post id to the user's sent list.
    async fn add_sent_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), DomainError>;

    /// Removes a post id from the user's sent list; absent ids are a no-op.
    async fn remove_sent_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), DomainError>;

    /// Appends a post id to the user's liked list with set semantics:
    /// returns `false` (and writes nothing) when the id is already present.
    async fn add_liked_post(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, DomainError>;
}
