use sqlx::PgPool;
use std::sync::Arc;

use linkcut::domain::entities::NewUser;
use linkcut::domain::repositories::UserRepository;
use linkcut::error::AppError;
use linkcut::infrastructure::persistence::PgUserRepository;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

#[sqlx::test]
async fn test_create_and_find_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let created = repo.create(new_user("user@example.com")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.email, "user@example.com");

    let by_email = repo.find_by_email("user@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);
    assert_eq!(by_email.password_hash, created.password_hash);

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "user@example.com");
}

#[sqlx::test]
async fn test_find_missing_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    assert!(repo.find_by_id(999).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_duplicate_email_is_conflict(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create(new_user("user@example.com")).await.unwrap();
    let result = repo.create(new_user("user@example.com")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_list_and_count_users(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    assert_eq!(repo.count().await.unwrap(), 0);

    repo.create(new_user("a@example.com")).await.unwrap();
    repo.create(new_user("b@example.com")).await.unwrap();

    let users = repo.list().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "a@example.com");
    assert_eq!(users[1].email, "b@example.com");
    assert_eq!(repo.count().await.unwrap(), 2);
}
