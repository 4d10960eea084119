//! PostgreSQL link store tests. Each test gets a fresh database from
//! `#[sqlx::test]` with migrations applied; they need `DATABASE_URL` and are
//! ignored by default.

use atlas_links::domain::entities::LinkRecord;
use atlas_links::domain::errors::LinkError;
use atlas_links::domain::repositories::LinkRepository;
use atlas_links::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn go_link() -> LinkRecord {
    LinkRecord::new("go", "Go Link", "https://example.com", true, "alice")
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_get(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create_link(go_link()).await.unwrap();
    let stored = repo.get_link_details("go").await.unwrap();

    assert!(stored.content_eq(&go_link()));
    assert_eq!(stored.last_modified_by, "alice");
    assert!(stored.created_time > 0);
    assert_eq!(stored.created_time, stored.last_modified);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_duplicate(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create_link(go_link()).await.unwrap();

    let mut other = go_link();
    other.target_url = "https://example.org".to_string();
    assert_eq!(repo.create_link(other).await, Err(LinkError::AlreadyExists));

    let stored = repo.get_link_details("go").await.unwrap();
    assert_eq!(stored.target_url, "https://example.com");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_creates_admit_exactly_one(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                let record = LinkRecord::new(
                    "go",
                    "Go Link",
                    format!("https://example.com/{i}"),
                    true,
                    "alice",
                );
                repo.create_link(record).await
            })
        })
        .collect();

    let mut created = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => created += 1,
            Err(LinkError::AlreadyExists) => duplicates += 1,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(duplicates, 15);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_missing_path(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let mut record = go_link();
    record.path = String::new();

    assert_eq!(repo.create_link(record).await, Err(LinkError::MissingPath));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_get_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert_eq!(
        repo.get_link_details("missing").await,
        Err(LinkError::NotFound)
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create_link(go_link()).await.unwrap();
    let created = repo.get_link_details("go").await.unwrap();

    let mut changed = go_link();
    changed.enabled = false;
    changed.last_modified_by = "bob".to_string();
    repo.update_link(changed).await.unwrap();

    let updated = repo.get_link_details("go").await.unwrap();
    assert!(!updated.enabled);
    assert_eq!(updated.last_modified_by, "bob");
    assert_eq!(updated.created_time, created.created_time);
    assert!(updated.last_modified > created.last_modified);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_no_change(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create_link(go_link()).await.unwrap();
    let before = repo.get_link_details("go").await.unwrap();

    let mut same = go_link();
    same.last_modified_by = "bob".to_string();
    assert_eq!(repo.update_link(same).await, Err(LinkError::NoChange));

    assert_eq!(repo.get_link_details("go").await.unwrap(), before);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert_eq!(repo.update_link(go_link()).await, Err(LinkError::NotFound));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create_link(go_link()).await.unwrap();

    repo.delete_link("go").await.unwrap();

    assert_eq!(repo.get_link_details("go").await, Err(LinkError::NotFound));
    assert_eq!(repo.delete_link("go").await, Err(LinkError::NotFound));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_health_check(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.health_check().await);
}
