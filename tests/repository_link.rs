mod common;

use sqlx::PgPool;
use std::sync::Arc;

use link_manager::application::services::LinkService;
use link_manager::domain::entities::{Link, LinkChanges, NewLink};
use link_manager::domain::repositories::LinkRepository;
use link_manager::error::AppError;
use link_manager::infrastructure::persistence::PgLinkRepository;

fn new_link(short_name: &str, original_url: &str) -> NewLink {
    NewLink {
        original_url: original_url.to_string(),
        short_name: short_name.to_string(),
    }
}

fn changes(short_name: &str, original_url: &str) -> LinkChanges {
    LinkChanges {
        original_url: original_url.to_string(),
        short_name: short_name.to_string(),
    }
}

async fn seed(repo: &dyn LinkRepository, count: usize) {
    for i in 0..count {
        repo.create(new_link(&format!("test{i}"), &format!("https://example.com/{i}")))
            .await
            .unwrap();
    }
}

// ─── SQLite ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_link() {
    let repo = common::create_test_repository().await;

    let link = repo
        .create(new_link("exmpl", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.id, 1);
    assert_eq!(link.short_name, "exmpl");
    assert_eq!(link.original_url, "https://example.com");
}

#[tokio::test]
async fn test_create_duplicate_short_name() {
    let repo = common::create_test_repository().await;
    repo.create(new_link("dup", "https://example.com/1"))
        .await
        .unwrap();

    let result = repo.create(new_link("dup", "https://example.com/2")).await;

    match result {
        Err(AppError::Conflict { message, .. }) => {
            assert_eq!(message, "Short name already exists")
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_get_by_id_and_short_name() {
    let repo = common::create_test_repository().await;
    let created = repo
        .create(new_link("findme", "https://example.com"))
        .await
        .unwrap();

    let by_id = repo.get_by_id(created.id).await.unwrap();
    let by_name = repo.get_by_short_name("findme").await.unwrap();

    assert_eq!(by_id, Some(created.clone()));
    assert_eq!(by_name, Some(created));
}

#[tokio::test]
async fn test_get_missing() {
    let repo = common::create_test_repository().await;

    assert!(repo.get_by_id(999).await.unwrap().is_none());
    assert!(repo.get_by_short_name("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_orders_by_id() {
    let repo = common::create_test_repository().await;
    seed(repo.as_ref(), 4).await;

    let links = repo.list(None, None).await.unwrap();

    let ids: Vec<i64> = links.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_list_with_offset_and_limit() {
    let repo = common::create_test_repository().await;
    seed(repo.as_ref(), 10).await;

    let links = repo.list(Some(3), Some(4)).await.unwrap();
    let names: Vec<&str> = links.iter().map(|l| l.short_name.as_str()).collect();
    assert_eq!(names, vec!["test3", "test4", "test5", "test6"]);

    let tail = repo.list(Some(8), None).await.unwrap();
    assert_eq!(tail.len(), 2);

    let beyond = repo.list(Some(20), Some(5)).await.unwrap();
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn test_count() {
    let repo = common::create_test_repository().await;
    assert_eq!(repo.count().await.unwrap(), 0);

    seed(repo.as_ref(), 3).await;

    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_update_link() {
    let repo = common::create_test_repository().await;
    let created = repo
        .create(new_link("before", "https://example.com/old"))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            LinkChanges {
                original_url: "https://example.com/new".to_string(),
                short_name: "after".to_string(),
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.short_name, "after");
    assert_eq!(updated.original_url, "https://example.com/new");
    assert_eq!(updated.created_at, created.created_at);
    assert!(repo.get_by_short_name("before").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_missing_returns_none() {
    let repo = common::create_test_repository().await;

    let result = repo
        .update(999, changes("ghost", "https://example.com"))
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_update_to_taken_short_name() {
    let repo = common::create_test_repository().await;
    repo.create(new_link("taken", "https://example.com/1"))
        .await
        .unwrap();
    let other = repo
        .create(new_link("other", "https://example.com/2"))
        .await
        .unwrap();

    let result = repo
        .update(other.id, changes("taken", "https://example.com/2"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    let unchanged = repo.get_by_id(other.id).await.unwrap().unwrap();
    assert_eq!(unchanged.short_name, "other");
}

#[tokio::test]
async fn test_delete_link() {
    let repo = common::create_test_repository().await;
    let created = repo
        .create(new_link("gone", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let repo = common::create_test_repository().await;
    seed(repo.as_ref(), 2).await;
    repo.delete(2).await.unwrap();

    let link = repo
        .create(new_link("next", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.id, 3);
}

#[tokio::test]
async fn test_service_concurrent_creates_single_winner() {
    let service = LinkService::new(common::create_test_repository().await);

    let results = create_same_name_concurrently(&service).await;

    let ok = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::Conflict { .. })))
        .count();
    assert_eq!(ok, 1);
    assert_eq!(conflicts, 2);
    assert_eq!(service.count().await.unwrap(), 1);
}

async fn create_same_name_concurrently(
    service: &LinkService<dyn LinkRepository>,
) -> Vec<Result<Link, AppError>> {
    let (a, b, c) = tokio::join!(
        service.create_link(new_link("race", "https://example.com/a")),
        service.create_link(new_link("race", "https://example.com/b")),
        service.create_link(new_link("race", "https://example.com/c")),
    );
    vec![a, b, c]
}

// ─── PostgreSQL ──────────────────────────────────────────────────────────────

#[sqlx::test(migrations = "migrations/postgres")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_pg_create_and_get(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let created = repo
        .create(new_link("exmpl", "https://example.com"))
        .await
        .unwrap();

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.short_name, "exmpl");
    assert_eq!(fetched.original_url, "https://example.com");
}

#[sqlx::test(migrations = "migrations/postgres")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_pg_duplicate_short_name(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("dup", "https://example.com/1"))
        .await
        .unwrap();

    let result = repo.create(new_link("dup", "https://example.com/2")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test(migrations = "migrations/postgres")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_pg_list_slice_and_count(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    seed(&repo, 6).await;

    let page = repo.list(Some(2), Some(3)).await.unwrap();
    let names: Vec<&str> = page.iter().map(|l| l.short_name.as_str()).collect();

    assert_eq!(names, vec!["test2", "test3", "test4"]);
    assert_eq!(repo.list(None, None).await.unwrap().len(), 6);
    assert_eq!(repo.count().await.unwrap(), 6);
}

#[sqlx::test(migrations = "migrations/postgres")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_pg_update_and_delete(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let created = repo
        .create(new_link("before", "https://example.com"))
        .await
        .unwrap();

    let updated = repo
        .update(created.id, changes("after", "https://example.com/x"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.short_name, "after");

    assert!(repo.delete(created.id).await.unwrap());
    assert!(
        repo.update(created.id, changes("x", "y"))
            .await
            .unwrap()
            .is_none()
    );
}
