use std::time::{SystemTime, UNIX_EPOCH};

use booklend_client::{LendClient, LendClientError};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

fn base_url() -> String {
    std::env::var("BOOKLEND_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}

#[tokio::test]
#[ignore = "requires running HTTP server"]
async fn http_smoke_flow() {
    let suffix = unique_suffix();
    let password = "password123";

    // Владелец выкладывает книгу.
    let mut owner = LendClient::new(base_url());
    let owner_name = format!("owner_{suffix}");
    let register = owner
        .register(&owner_name, password)
        .await
        .expect("register must succeed");
    assert!(!register.access_token.is_empty());
    assert_eq!(register.user.username, owner_name);
    assert!(owner.get_token().is_some());

    let created = owner
        .create_post("The Dispossessed", "Ursula K. Le Guin", "lightly annotated")
        .await
        .expect("create_post must succeed");
    assert_eq!(created.title, "The Dispossessed");
    assert_eq!(created.wanted, 0);

    let login = owner
        .login(&owner_name, password)
        .await
        .expect("login must succeed");
    assert_eq!(login.user.username, owner_name);

    // Свой пост отметить нельзя.
    let self_like = owner.like_post(created.id).await;
    assert!(matches!(self_like, Err(LendClientError::InvalidRequest(_))));

    // Второй пользователь находит книгу и отмечает интерес.
    let mut reader = LendClient::new(base_url());
    let reader_name = format!("reader_{suffix}");
    reader
        .register(&reader_name, password)
        .await
        .expect("register must succeed");

    let listed = reader
        .list_posts(Some("dispossessed"))
        .await
        .expect("list_posts must succeed");
    assert!(listed.posts.iter().any(|post| post.id == created.id));

    let fetched = reader
        .get_post(created.id)
        .await
        .expect("get_post must succeed");
    assert_eq!(fetched.id, created.id);

    let wanted = reader
        .like_post(created.id)
        .await
        .expect("like_post must succeed");
    assert_eq!(wanted, 1);

    let duplicate = reader.like_post(created.id).await;
    assert!(matches!(duplicate, Err(LendClientError::InvalidRequest(_))));

    let account = reader.account().await.expect("account must succeed");
    assert!(account.liked_posts.iter().any(|post| post.id == created.id));

    // Чужой пост удалить нельзя.
    let forbidden = reader.delete_post(created.id).await;
    assert!(matches!(forbidden, Err(LendClientError::Forbidden)));

    reader
        .update_email(&format!("reader_{suffix}@example.com"))
        .await
        .expect("update_email must succeed");

    // Владелец удаляет пост; у читателя он пропадает из отмеченных.
    owner
        .delete_post(created.id)
        .await
        .expect("delete_post must succeed");

    let after_delete = reader.get_post(created.id).await;
    assert!(matches!(after_delete, Err(LendClientError::NotFound)));

    let account = reader.account().await.expect("account must succeed");
    assert!(!account.liked_posts.iter().any(|post| post.id == created.id));

    reader.logout();
    assert!(reader.get_token().is_none());
    let unauthorized = reader.account().await;
    assert!(matches!(unauthorized, Err(LendClientError::Unauthorized)));
}
