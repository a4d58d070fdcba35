use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post};
use crate::domain::user::{UpdateEmailRequest, User};

/// A user's account page data: owned listings and liked listings, both
/// resolved against the post collection. Liked ids whose post has been
/// deleted are already filtered out here.
#[derive(Debug, Clone)]
pub(crate) struct AccountView {
    pub(crate) user: User,
    pub(crate) sent_posts: Vec<Post>,
    pub(crate) liked_posts: Vec<Post>,
}

/// The mutation protocol: every operation that touches more than one
/// document goes through here, so the cross-document ordering rules live in
/// one place.
pub(crate) struct LendingService<P: PostRepository, U: UserRepository> {
    posts: P,
    users: U,
}

impl<P: PostRepository, U: UserRepository> LendingService<P, U> {
    pub(crate) fn new(posts: P, users: U) -> Self {
        Self { posts, users }
    }

    /// Inserts the post, then links it to the owner's sent list. The store
    /// has no multi-document transactions: a failure between the two steps
    /// leaves an orphaned post, which is accepted; the error still surfaces.
    pub(crate) async fn create_post(
        &self,
        owner_id: Uuid,
        owner_username: &str,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            author: req.author,
            description: req.description,
            owner_id,
            owner_username: owner_username.to_string(),
        };
        let post = self.posts.insert_post(new_post).await?;
        self.users.add_sent_post(owner_id, post.id).await?;
        Ok(post)
    }

    /// Owner-only delete. Unlinks the post from the owner's sent list, then
    /// removes the document. Other users' liked lists are deliberately left
    /// alone: scrubbing them would fan out across every liker, so dangling
    /// ids are filtered at read time instead (`account_view`).
    pub(crate) async fn delete_post(
        &self,
        caller_id: Uuid,
        post_id: Uuid,
    ) -> Result<(), DomainError> {
        let post = self
            .posts
            .get_post(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))?;

        if post.owner_id != caller_id {
            return Err(DomainError::Forbidden);
        }

        self.users.remove_sent_post(caller_id, post_id).await?;
        let deleted = self.posts.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        Ok(())
    }

    /// Records interest in a post and returns the new wanted count.
    ///
    /// Membership is written before the counter is touched, so the counter
    /// can never run ahead of the liked list. The set-semantics append also
    /// catches two likes from the same user racing past the precondition.
    pub(crate) async fn like_post(
        &self,
        caller_id: Uuid,
        post_id: Uuid,
    ) -> Result<u32, DomainError> {
        let post = self
            .posts
            .get_post(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))?;

        if post.owner_id == caller_id {
            return Err(DomainError::SelfAction("own post".to_string()));
        }

        let user = self
            .users
            .get_user(caller_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {caller_id}")))?;
        if user.has_liked(post_id) {
            return Err(DomainError::DuplicateAction("post already liked".to_string()));
        }

        let appended = self.users.add_liked_post(caller_id, post_id).await?;
        if !appended {
            return Err(DomainError::DuplicateAction("post already liked".to_string()));
        }

        match self.posts.increment_wanted(post_id).await? {
            Some(wanted) => Ok(wanted),
            // Post deleted between the membership append and the increment.
            // The dangling liked id stays behind and is dropped by the read
            // path, same as after any delete.
            None => Err(DomainError::NotFound(format!("post id: {post_id}"))),
        }
    }

    pub(crate) async fn search_posts(&self, term: &str) -> Result<Vec<Post>, DomainError> {
        self.posts.search_posts(term.trim()).await
    }

    pub(crate) async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn account_view(&self, user_id: Uuid) -> Result<AccountView, DomainError> {
        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {user_id}")))?;

        let sent_posts = self.posts.get_posts_by_ids(&user.sent_posts).await?;
        let liked_posts = self.posts.get_posts_by_ids(&user.liked_posts).await?;

        Ok(AccountView {
            user,
            sent_posts,
            liked_posts,
        })
    }

    pub(crate) async fn update_email(
        &self,
        user_id: Uuid,
        req: UpdateEmailRequest,
    ) -> Result<(), DomainError> {
        let req = req.validate()?;
        self.users.update_email(user_id, &req.email).await
    }
}
