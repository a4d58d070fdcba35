use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) description: String,
    pub(crate) owner_id: Uuid,
    /// Owner display name, denormalized onto the post for listing/search.
    pub(crate) owner_username: String,
    /// Count of distinct users who liked this post.
    pub(crate) wanted: u32,
    pub(crate) created_at: DateTime<Utc>,
}

impl Post {
    /// Case-insensitive substring match over title, author, description and
    /// owner display name. An empty (or blank) term matches every post.
    pub(crate) fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&term)
            || self.author.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self.owner_username.to_lowercase().contains(&term)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) description: String,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_short_text("title", &self.title)?,
            author: normalize_short_text("author", &self.author)?,
            description: normalize_description(&self.description)?,
        })
    }
}

fn normalize_short_text(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() || value.len() > 255 {
        return Err(DomainError::Validation {
            field,
            message: "must be 1..255 chars",
        });
    }
    Ok(value.to_string())
}

fn normalize_description(description: &str) -> Result<String, DomainError> {
    let description = description.trim();
    if description.is_empty() || description.len() > 4000 {
        return Err(DomainError::Validation {
            field: "description",
            message: "must be 1..4000 chars",
        });
    }
    Ok(description.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{CreatePostRequest, DomainError, Post};

    fn sample_post(title: &str, author: &str, description: &str, owner: &str) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            owner_id: Uuid::new_v4(),
            owner_username: owner.to_string(),
            wanted: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_post_request_validate_rejects_empty_title() {
        let req = CreatePostRequest {
            title: "   ".to_string(),
            author: "Ursula K. Le Guin".to_string(),
            description: "hardly used".to_string(),
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_post_request_validate_rejects_oversized_description() {
        let req = CreatePostRequest {
            title: "The Dispossessed".to_string(),
            author: "Ursula K. Le Guin".to_string(),
            description: "x".repeat(4001),
        };

        let err = req.validate().expect_err("description must be rejected");
        assert_validation_field(err, "description");
    }

    #[test]
    fn create_post_request_validate_normalizes_fields() {
        let req = CreatePostRequest {
            title: "  The Dispossessed  ".to_string(),
            author: "  Ursula K. Le Guin  ".to_string(),
            description: "  an ambiguous utopia  ".to_string(),
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "The Dispossessed");
        assert_eq!(validated.author, "Ursula K. Le Guin");
        assert_eq!(validated.description, "an ambiguous utopia");
    }

    #[test]
    fn matches_is_case_insensitive_across_fields() {
        let post = sample_post(
            "The Left Hand of Darkness",
            "Ursula K. Le Guin",
            "first contact on a frozen planet",
            "gently_used_books",
        );

        assert!(post.matches("left hand"));
        assert!(post.matches("LE GUIN"));
        assert!(post.matches("Frozen"));
        assert!(post.matches("gently_used"));
        assert!(!post.matches("dragons"));
    }

    #[test]
    fn matches_blank_term_matches_everything() {
        let post = sample_post("a", "b", "c", "d");
        assert!(post.matches(""));
        assert!(post.matches("   "));
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
