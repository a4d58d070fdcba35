use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) description: String,
    pub(crate) owner_id: Uuid,
    pub(crate) owner_username: String,
}

/// Access interface over the `posts` collection of the document store.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    /// Inserts a new post document with a store-assigned id and creation
    /// timestamp and a zero wanted counter.
    async fn insert_post(&self, input: NewPost) -> Result<Post, DomainError>;

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, DomainError>;

    /// Returns whether a document was actually removed.
    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Case-insensitive substring search over title, author, description and
    /// owner display name. An empty term returns every post. Newest first,
    /// id as tie-breaker, so the order is stable within a call.
    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, DomainError>;

    /// Resolves an id list against the collection, silently dropping ids
    /// with no matching document (the lazy filter for dangling references).
    async fn get_posts_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Post>, DomainError>;

    /// Atomic increment-and-fetch of the wanted counter. Returns `None` when
    /// the post no longer exists.
    async fn increment_wanted(&self, id: Uuid) -> Result<Option<u32>, DomainError>;
}
