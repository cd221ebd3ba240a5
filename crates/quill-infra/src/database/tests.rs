use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserQuery, UserRepository};

use super::entity::{post, user};
use super::repos::{SeaOrmPostRepository, SeaOrmUserRepository};

fn post_model(id: Uuid, user_id: Uuid, title: &str) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id,
        user_id,
        title: title.to_owned(),
        content: "Content".to_owned(),
        status: post::Status::Published,
        is_featured: false,
        publish_date: now.naive_utc(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn user_model(id: Uuid, name: &str, email: &str) -> user::Model {
    let now = chrono::Utc::now();
    user::Model {
        id,
        name: name.to_owned(),
        email: email.to_owned(),
        password_hash: "$argon2$...".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    let mut row = BTreeMap::new();
    row.insert("num_items", Value::BigInt(Some(n)));
    row
}

#[tokio::test]
async fn find_post_by_id_maps_to_domain() {
    let post_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(post_id, user_id, "Test Post")]])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.status, PostStatus::Published);
}

#[tokio::test]
async fn find_user_by_email_maps_to_domain() {
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(user_id, "Jane", "jane@example.com")]])
        .into_connection();

    let repo = SeaOrmUserRepository::new(db);

    let user: Option<User> = repo.find_by_email("jane@example.com").await.unwrap();

    let user = user.unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(user.name, "Jane");
}

#[tokio::test]
async fn delete_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    let result: Result<(), RepoError> =
        BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn user_listing_pages_and_counts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(1)]])
        .append_query_results(vec![vec![user_model(
            Uuid::new_v4(),
            "Jane",
            "jane@example.com",
        )]])
        .into_connection();

    let repo = SeaOrmUserRepository::new(db);

    let page = repo.list(&UserQuery::default()).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 10);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Jane");
}

#[tokio::test]
async fn title_exists_reports_duplicates() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(1)]])
        .append_query_results(vec![vec![count_row(0)]])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    assert!(repo.title_exists("Taken", None).await.unwrap());
    assert!(!repo.title_exists("Fresh", None).await.unwrap());
}
