//! Handler tests against stub repositories.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::body::to_bytes;
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, test::TestRequest, web};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use quill_core::ApiVersion;
use quill_core::domain::{Comment, Like, Post, PostDetail, PostStatus, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    AuthError, BaseRepository, CommentRepository, LikeRepository, Page, PasswordService,
    PostQuery, PostRepository, TokenRevocationStore, UserQuery, UserRepository,
};
use quill_infra::{Argon2PasswordService, InMemoryRevocationStore};

use super::{auth, frontend, posts, users};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::version::RequestedVersion;
use crate::requests::v1_0::{
    CommentStoreRequest, ListParams, LoginRequest, PostStoreRequest, PostUpdateRequest,
    UserStoreRequest,
};
use crate::state::AppState;

#[derive(Default)]
struct StubUsers {
    users: Vec<User>,
}

#[async_trait]
impl BaseRepository<User, Uuid> for StubUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, entity: User) -> Result<User, RepoError> {
        Ok(entity)
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        Ok(entity)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for StubUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        Ok(self
            .users
            .iter()
            .any(|u| u.email == email && Some(u.id) != exclude))
    }

    async fn list(&self, query: &UserQuery) -> Result<Page<User>, RepoError> {
        Ok(Page {
            items: self.users.clone(),
            total: self.users.len() as u64,
            page: query.page.page,
            per_page: query.page.per_page,
        })
    }
}

#[derive(Default)]
struct StubPosts {
    posts: Vec<Post>,
}

#[async_trait]
impl BaseRepository<Post, Uuid> for StubPosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        Ok(entity)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        Ok(entity)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Ok(())
    }
}

#[async_trait]
impl PostRepository for StubPosts {
    async fn list(&self, query: &PostQuery) -> Result<Page<Post>, RepoError> {
        let items: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| query.author_id.is_none_or(|a| p.user_id == a))
            .cloned()
            .collect();
        let total = items.len() as u64;
        Ok(Page {
            items,
            total,
            page: query.page.page,
            per_page: query.page.per_page,
        })
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>, RepoError> {
        Ok(self
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .map(PostDetail::bare))
    }

    async fn title_exists(&self, title: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        Ok(self
            .posts
            .iter()
            .any(|p| p.title == title && Some(p.id) != exclude))
    }
}

#[derive(Default)]
struct StubComments {
    inserted: Mutex<Vec<Comment>>,
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for StubComments {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(None)
    }

    async fn insert(&self, entity: Comment) -> Result<Comment, RepoError> {
        self.inserted.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Comment) -> Result<Comment, RepoError> {
        Ok(entity)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Ok(())
    }
}

impl CommentRepository for StubComments {}

struct StubLikes {
    already_liked: bool,
}

#[async_trait]
impl LikeRepository for StubLikes {
    async fn insert(&self, like: Like) -> Result<Like, RepoError> {
        if self.already_liked {
            Err(RepoError::Conflict("post_likes_user_post_unique".into()))
        } else {
            Ok(like)
        }
    }
}

/// Counts hashing work so tests can see whether a code path did any.
struct CountingPasswords {
    rounds: Arc<AtomicUsize>,
}

impl PasswordService for CountingPasswords {
    fn hash(&self, _password: &str) -> Result<String, AuthError> {
        self.rounds.fetch_add(1, Ordering::SeqCst);
        Ok("stub-hash".to_string())
    }

    fn verify(&self, _password: &str, _hash: &str) -> Result<bool, AuthError> {
        self.rounds.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }
}

fn sample_user(email: &str, password_hash: &str) -> User {
    User::new("Jane Doe".to_string(), email.to_string(), password_hash.to_string())
}

fn sample_post(author: Uuid, title: &str) -> Post {
    Post::new(
        author,
        title.to_string(),
        "Some content".to_string(),
        PostStatus::Published,
        false,
        Utc::now().naive_utc(),
    )
}

fn state_with(users: StubUsers, posts: StubPosts, likes: StubLikes) -> web::Data<AppState> {
    web::Data::new(AppState {
        users: Arc::new(users),
        posts: Arc::new(posts),
        comments: Arc::new(StubComments::default()),
        likes: Arc::new(likes),
        passwords: Arc::new(Argon2PasswordService::new()),
    })
}

fn identity_for(user: &User) -> Identity {
    Identity {
        user_id: user.id,
        email: user.email.clone(),
        jti: Uuid::new_v4(),
        expires_at: Utc::now().timestamp() + 3600,
    }
}

fn version(v: &str) -> RequestedVersion {
    RequestedVersion(v.parse::<ApiVersion>().unwrap())
}

fn http_request(path: &str) -> HttpRequest {
    TestRequest::get().uri(path).to_http_request()
}

fn default_params() -> web::Query<ListParams> {
    web::Query(ListParams {
        search: None,
        page: None,
        limit: None,
        order_by: None,
        order: None,
        is_featured: None,
    })
}

async fn body_json(response: HttpResponse) -> serde_json::Value {
    let bytes = to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn status_of(result: &AppResult<HttpResponse>) -> StatusCode {
    match result {
        Ok(response) => response.status(),
        Err(error) => actix_web::ResponseError::status_code(error),
    }
}

#[actix_rt::test]
async fn login_issues_a_token() {
    let passwords = Argon2PasswordService::new();
    let hash = passwords.hash("P@ssw0rd").unwrap();
    let user = sample_user("jane@example.com", &hash);

    let state = state_with(
        StubUsers { users: vec![user] },
        StubPosts::default(),
        StubLikes { already_liked: false },
    );
    let tokens: web::Data<Arc<dyn quill_core::ports::TokenService>> = web::Data::new(Arc::new(
        quill_infra::JwtTokenService::new(quill_infra::JwtConfig::default()),
    ));

    let result = auth::login(
        version("v1.0"),
        state,
        tokens,
        web::Json(LoginRequest {
            email: Some("jane@example.com".to_string()),
            password: Some("P@ssw0rd".to_string()),
        }),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::CREATED);
    let body = body_json(result.unwrap()).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[actix_rt::test]
async fn login_with_wrong_password_is_unauthorized() {
    let passwords = Argon2PasswordService::new();
    let hash = passwords.hash("P@ssw0rd").unwrap();
    let user = sample_user("jane@example.com", &hash);

    let state = state_with(
        StubUsers { users: vec![user] },
        StubPosts::default(),
        StubLikes { already_liked: false },
    );
    let tokens: web::Data<Arc<dyn quill_core::ports::TokenService>> = web::Data::new(Arc::new(
        quill_infra::JwtTokenService::new(quill_infra::JwtConfig::default()),
    ));

    let result = auth::login(
        version("v1.0"),
        state,
        tokens,
        web::Json(LoginRequest {
            email: Some("jane@example.com".to_string()),
            password: Some("not-the-password".to_string()),
        }),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn login_with_unknown_email_still_pays_the_hashing_cost() {
    let rounds = Arc::new(AtomicUsize::new(0));
    let state = web::Data::new(AppState {
        users: Arc::new(StubUsers::default()),
        posts: Arc::new(StubPosts::default()),
        comments: Arc::new(StubComments::default()),
        likes: Arc::new(StubLikes { already_liked: false }),
        passwords: Arc::new(CountingPasswords {
            rounds: rounds.clone(),
        }),
    });
    let tokens: web::Data<Arc<dyn quill_core::ports::TokenService>> = web::Data::new(Arc::new(
        quill_infra::JwtTokenService::new(quill_infra::JwtConfig::default()),
    ));

    let result = auth::login(
        version("v1.0"),
        state,
        tokens,
        web::Json(LoginRequest {
            email: Some("nobody@example.com".to_string()),
            password: Some("P@ssw0rd".to_string()),
        }),
    )
    .await;

    // Same answer as a wrong password, and the same amount of argon2
    // work, so timing does not reveal whether the account exists.
    assert_eq!(status_of(&result), StatusCode::UNAUTHORIZED);
    assert_eq!(rounds.load(Ordering::SeqCst), 1);
}

#[actix_rt::test]
async fn logout_revokes_only_the_current_token() {
    let store: Arc<dyn TokenRevocationStore> = Arc::new(InMemoryRevocationStore::new());
    let user = sample_user("jane@example.com", "irrelevant");
    let identity = identity_for(&user);
    let current_jti = identity.jti;
    let other_jti = Uuid::new_v4();

    let result = auth::logout(version("v1.0"), identity, web::Data::new(store.clone())).await;

    assert_eq!(status_of(&result), StatusCode::OK);
    let body = body_json(result.unwrap()).await;
    assert_eq!(
        body["message"],
        serde_json::json!("jane@example.com has been logged out.")
    );
    assert!(store.is_revoked(current_jti).await);
    assert!(!store.is_revoked(other_jti).await);
}

#[actix_rt::test]
async fn unsupported_version_is_not_found() {
    let state = state_with(
        StubUsers::default(),
        StubPosts::default(),
        StubLikes { already_liked: false },
    );

    let result = frontend::index(
        version("v0.9"),
        state,
        default_params(),
        http_request("/api/v0.9/frontend/posts"),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn frontend_listing_shapes_collection_envelope() {
    let author = Uuid::new_v4();
    let state = state_with(
        StubUsers::default(),
        StubPosts {
            posts: vec![sample_post(author, "First"), sample_post(author, "Second")],
        },
        StubLikes { already_liked: false },
    );

    let result = frontend::index(
        version("v1.0"),
        state,
        default_params(),
        http_request("/api/v1.0/frontend/posts"),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::OK);
    let body = body_json(result.unwrap()).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["meta"]["total"], serde_json::json!(2));
    assert_eq!(body["meta"]["current_page"], serde_json::json!(1));
    assert!(body["links"]["first"].as_str().is_some());
    // Bare listings never serialize relations.
    assert!(body["data"][0].get("author").is_none());
    assert!(body["data"][0].get("comments").is_none());
}

#[actix_rt::test]
async fn listing_rejects_unknown_order_column() {
    let state = state_with(
        StubUsers::default(),
        StubPosts::default(),
        StubLikes { already_liked: false },
    );

    let result = frontend::index(
        version("v1.0"),
        state,
        web::Query(ListParams {
            search: None,
            page: None,
            limit: None,
            order_by: Some("password_hash".to_string()),
            order: None,
            is_featured: None,
        }),
        http_request("/api/v1.0/frontend/posts"),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::UNPROCESSABLE_ENTITY);
    match result {
        Err(AppError::Validation(errors)) => assert!(errors.has("orderBy")),
        _ => panic!("expected a validation error"),
    }
}

#[actix_rt::test]
async fn storing_a_duplicate_title_is_unprocessable() {
    let user = sample_user("jane@example.com", "irrelevant");
    let identity = identity_for(&user);
    let state = state_with(
        StubUsers { users: vec![user] },
        StubPosts {
            posts: vec![sample_post(identity.user_id, "Taken")],
        },
        StubLikes { already_liked: false },
    );

    let result = posts::store(
        version("v1.0"),
        identity,
        state,
        web::Json(PostStoreRequest {
            title: Some("Taken".to_string()),
            body: Some("Fresh content".to_string()),
            status: Some("draft".to_string()),
            is_featured: Some(false),
            publish_date: Some("2026-01-01 09:00:00".to_string()),
        }),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::UNPROCESSABLE_ENTITY);
    match result {
        Err(AppError::Validation(errors)) => assert!(errors.has("title")),
        _ => panic!("expected a validation error"),
    }
}

#[actix_rt::test]
async fn liking_a_post_twice_is_a_conflict() {
    let user = sample_user("jane@example.com", "irrelevant");
    let identity = identity_for(&user);
    let post = sample_post(identity.user_id, "Liked already");
    let post_id = post.id;
    let state = state_with(
        StubUsers { users: vec![user] },
        StubPosts { posts: vec![post] },
        StubLikes { already_liked: true },
    );

    let result = frontend::like_post(
        version("v1.0"),
        identity,
        state,
        web::Path::from(frontend::FrontendPostPath { post_id }),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn liking_a_missing_post_is_not_found() {
    let user = sample_user("jane@example.com", "irrelevant");
    let identity = identity_for(&user);
    let state = state_with(
        StubUsers { users: vec![user] },
        StubPosts::default(),
        StubLikes { already_liked: false },
    );

    let result = frontend::like_post(
        version("v1.0"),
        identity,
        state,
        web::Path::from(frontend::FrontendPostPath {
            post_id: Uuid::new_v4(),
        }),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn commenting_returns_the_post_detail() {
    let user = sample_user("jane@example.com", "irrelevant");
    let identity = identity_for(&user);
    let post = sample_post(identity.user_id, "Open thread");
    let post_id = post.id;
    let state = state_with(
        StubUsers { users: vec![user] },
        StubPosts { posts: vec![post] },
        StubLikes { already_liked: false },
    );

    let result = frontend::comment_post(
        version("v1.0"),
        identity,
        state,
        web::Path::from(frontend::FrontendPostPath { post_id }),
        web::Json(CommentStoreRequest {
            comment: Some("Nice blog post bro".to_string()),
        }),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::OK);
    let body = body_json(result.unwrap()).await;
    assert_eq!(body["data"]["title"], serde_json::json!("Open thread"));
}

#[actix_rt::test]
async fn registration_rejects_a_taken_email() {
    let user = sample_user("jane@example.com", "irrelevant");
    let state = state_with(
        StubUsers { users: vec![user] },
        StubPosts::default(),
        StubLikes { already_liked: false },
    );

    let result = users::store(
        version("v1.0"),
        state,
        web::Json(UserStoreRequest {
            name: Some("Jane Again".to_string()),
            email: Some("jane@example.com".to_string()),
            password: Some("P@ssw0rd".to_string()),
        }),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::UNPROCESSABLE_ENTITY);
    match result {
        Err(AppError::Validation(errors)) => assert!(errors.has("email")),
        _ => panic!("expected a validation error"),
    }
}

#[actix_rt::test]
async fn partial_update_keeps_omitted_fields() {
    let user = sample_user("jane@example.com", "irrelevant");
    let identity = identity_for(&user);
    let post = sample_post(identity.user_id, "Original title");
    let post_id = post.id;
    let state = state_with(
        StubUsers { users: vec![user] },
        StubPosts { posts: vec![post] },
        StubLikes { already_liked: false },
    );

    let result = posts::update(
        version("v1.0"),
        identity,
        state,
        web::Path::from(posts::PostPath { id: post_id }),
        web::Json(PostUpdateRequest {
            title: None,
            body: Some("Rewritten content".to_string()),
            status: None,
            is_featured: None,
            publish_date: None,
        }),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::OK);
    let body = body_json(result.unwrap()).await;
    assert_eq!(body["data"]["title"], serde_json::json!("Original title"));
    assert_eq!(body["data"]["body"], serde_json::json!("Rewritten content"));
}

#[actix_rt::test]
async fn updating_someone_elses_post_is_not_found() {
    let owner = Uuid::new_v4();
    let user = sample_user("jane@example.com", "irrelevant");
    let identity = identity_for(&user);
    let post = sample_post(owner, "Not yours");
    let post_id = post.id;
    let state = state_with(
        StubUsers { users: vec![user] },
        StubPosts { posts: vec![post] },
        StubLikes { already_liked: false },
    );

    let result = posts::destroy(
        version("v1.0"),
        identity,
        state,
        web::Path::from(posts::PostPath { id: post_id }),
    )
    .await;

    assert_eq!(status_of(&result), StatusCode::NOT_FOUND);
}
