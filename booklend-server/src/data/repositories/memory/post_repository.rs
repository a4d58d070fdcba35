use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

/// In-memory `posts` collection. The collection write lock is what makes
/// `increment_wanted` a single-document compare-and-increment: no two
/// increments on the same post can interleave.
#[derive(Debug, Clone)]
pub(crate) struct MemoryPostRepository {
    posts: Arc<RwLock<HashMap<Uuid, Post>>>,
}

impl MemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self {
            posts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let post = Post {
            id: Uuid::new_v4(),
            title: input.title,
            author: input.author,
            description: input.description,
            owner_id: input.owner_id,
            owner_username: input.owner_username,
            wanted: 0,
            created_at: Utc::now(),
        };

        let mut posts = self.posts.write().await;
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts.get(&id).cloned())
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut posts = self.posts.write().await;
        Ok(posts.remove(&id).is_some())
    }

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.read().await;
        let mut found: Vec<Post> = posts
            .values()
            .filter(|post| post.matches(term))
            .cloned()
            .collect();
        // Newest first, id as tie-breaker: stable within a call.
        found.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(found)
    }

    async fn get_posts_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.read().await;
        Ok(ids.iter().filter_map(|id| posts.get(id).cloned()).collect())
    }

    async fn increment_wanted(&self, id: Uuid) -> Result<Option<u32>, DomainError> {
        let mut posts = self.posts.write().await;
        Ok(posts.get_mut(&id).map(|post| {
            post.wanted += 1;
            post.wanted
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str, owner_username: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            author: "Some Author".to_string(),
            description: "a well-loved copy".to_string(),
            owner_id: Uuid::new_v4(),
            owner_username: owner_username.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_post_assigns_id_and_zero_counter() {
        let repo = MemoryPostRepository::new();
        let post = repo
            .insert_post(new_post("Dune", "spice_lender"))
            .await
            .expect("insert must succeed");

        assert_eq!(post.wanted, 0);
        let stored = repo
            .get_post(post.id)
            .await
            .expect("lookup must succeed")
            .expect("post must exist");
        assert_eq!(stored.title, "Dune");
    }

    #[tokio::test]
    async fn delete_post_reports_whether_document_was_removed() {
        let repo = MemoryPostRepository::new();
        let post = repo
            .insert_post(new_post("Dune", "spice_lender"))
            .await
            .expect("insert must succeed");

        assert!(repo.delete_post(post.id).await.expect("must succeed"));
        assert!(!repo.delete_post(post.id).await.expect("must succeed"));
        assert!(
            repo.get_post(post.id)
                .await
                .expect("lookup must succeed")
                .is_none()
        );
    }

    #[tokio::test]
    async fn search_posts_empty_term_returns_everything() {
        let repo = MemoryPostRepository::new();
        repo.insert_post(new_post("Dune", "a"))
            .await
            .expect("insert must succeed");
        repo.insert_post(new_post("Emma", "b"))
            .await
            .expect("insert must succeed");

        let all = repo.search_posts("").await.expect("search must succeed");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn search_posts_filters_case_insensitively() {
        let repo = MemoryPostRepository::new();
        repo.insert_post(new_post("Dune Messiah", "spice_lender"))
            .await
            .expect("insert must succeed");
        repo.insert_post(new_post("Emma", "austen_fan"))
            .await
            .expect("insert must succeed");

        let found = repo
            .search_posts("dune")
            .await
            .expect("search must succeed");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Dune Messiah");

        let by_owner = repo
            .search_posts("AUSTEN")
            .await
            .expect("search must succeed");
        assert_eq!(by_owner.len(), 1);
        assert_eq!(by_owner[0].title, "Emma");
    }

    #[tokio::test]
    async fn get_posts_by_ids_drops_missing_ids() {
        let repo = MemoryPostRepository::new();
        let kept = repo
            .insert_post(new_post("Dune", "a"))
            .await
            .expect("insert must succeed");
        let deleted = repo
            .insert_post(new_post("Emma", "b"))
            .await
            .expect("insert must succeed");
        repo.delete_post(deleted.id)
            .await
            .expect("delete must succeed");

        let resolved = repo
            .get_posts_by_ids(&[kept.id, deleted.id, Uuid::new_v4()])
            .await
            .expect("resolve must succeed");
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, kept.id);
    }

    #[tokio::test]
    async fn increment_wanted_returns_new_value_or_none() {
        let repo = MemoryPostRepository::new();
        let post = repo
            .insert_post(new_post("Dune", "a"))
            .await
            .expect("insert must succeed");

        assert_eq!(
            repo.increment_wanted(post.id)
                .await
                .expect("increment must succeed"),
            Some(1)
        );
        assert_eq!(
            repo.increment_wanted(post.id)
                .await
                .expect("increment must succeed"),
            Some(2)
        );
        assert_eq!(
            repo.increment_wanted(Uuid::new_v4())
                .await
                .expect("increment on missing post must not fail"),
            None
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_increments_are_never_lost() {
        let repo = Arc::new(MemoryPostRepository::new());
        let post = repo
            .insert_post(new_post("Dune", "a"))
            .await
            .expect("insert must succeed");

        let mut handles = Vec::new();
        for _ in 0..16 {
            let repo = Arc::clone(&repo);
            let post_id = post.id;
            handles.push(tokio::spawn(async move {
                repo.increment_wanted(post_id)
                    .await
                    .expect("increment must succeed")
            }));
        }
        for handle in handles {
            handle.await.expect("task must not panic");
        }

        let stored = repo
            .get_post(post.id)
            .await
            .expect("lookup must succeed")
            .expect("post must exist");
        assert_eq!(stored.wanted, 16);
    }
}
