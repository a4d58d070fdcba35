use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_register_username(&self.username)?;
        let password_len = self.password.chars().count();
        if password_len < 8 || password_len > 128 {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 8..128 chars",
            });
        }
        Ok(Self {
            username,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..64 chars",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdateEmailRequest {
    pub(crate) email: String,
}

impl UpdateEmailRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            email: normalize_email(&self.email)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct User {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    /// Absent until the user sets it from the account page.
    pub(crate) email: Option<String>,
    /// Ids of posts this user currently lists.
    pub(crate) sent_posts: Vec<Uuid>,
    /// Ids of posts this user liked. May keep dangling ids after a post is
    /// deleted; the account read path filters those out.
    pub(crate) liked_posts: Vec<Uuid>,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn has_liked(&self, post_id: Uuid) -> bool {
        self.liked_posts.contains(&post_id)
    }
}

fn normalize_register_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    if username.len() < 3 || username.len() > 64 {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..64 chars",
        });
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{
        RegisterRequest, UpdateEmailRequest, User, normalize_email, normalize_register_username,
    };

    #[test]
    fn register_username_rules_are_applied() {
        assert!(normalize_register_username("ab").is_err());
        assert!(normalize_register_username("  valid_user  ").is_ok());
    }

    #[test]
    fn register_password_length_is_checked() {
        let short = RegisterRequest {
            username: "valid_user".to_string(),
            password: "short".to_string(),
        };
        assert!(short.validate().is_err());

        let ok = RegisterRequest {
            username: "  valid_user  ".to_string(),
            password: "very-secure-password".to_string(),
        };
        let validated = ok.validate().expect("must be valid");
        assert_eq!(validated.username, "valid_user");
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
    }

    #[test]
    fn update_email_rejects_garbage() {
        let req = UpdateEmailRequest {
            email: "not-an-email".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn has_liked_checks_membership() {
        let liked = Uuid::new_v4();
        let user = User {
            id: Uuid::new_v4(),
            username: "reader".to_string(),
            email: None,
            sent_posts: Vec::new(),
            liked_posts: vec![liked],
            created_at: Utc::now(),
        };

        assert!(user.has_liked(liked));
        assert!(!user.has_liked(Uuid::new_v4()));
    }
}
