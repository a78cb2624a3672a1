// tests/support/helpers.rs
use super::builders::ArticleBuilder;
use super::mocks;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use newsdesk_core::application::ports::security::TokenVerifier;
use newsdesk_core::application::services::ApplicationServices;
use newsdesk_core::domain::article::{Article, ArticleReadRepository, ArticleWriteRepository};
use newsdesk_core::domain::category::{Category, CategoryId};
use newsdesk_core::domain::media::{Media, MediaId};
use newsdesk_core::domain::user::{Email, PasswordHash, Role, User, UserId, Username};
use newsdesk_core::infrastructure::repositories::InMemoryArticleRepository;
use newsdesk_core::infrastructure::util::DefaultSlugGenerator;
use newsdesk_core::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt as _;

pub const SEEDED_CATEGORY_ID: i64 = 1;
pub const SEEDED_MEDIA_ID: i64 = 1;

fn user(id: i64, username: &str, role: Role) -> User {
    User {
        id: UserId::new(id).unwrap(),
        username: Username::new(username).unwrap(),
        email: Email::new(format!("{username}@example.com")).unwrap(),
        password_hash: Some(PasswordHash::new("$argon2id$v=19$secret-hash").unwrap()),
        role,
    }
}

/// Users matching the dummy tokens plus one category and one cover image.
pub fn seed_fixtures(repo: &InMemoryArticleRepository) {
    repo.insert_user(user(mocks::EDITOR_ID, "editor", Role::Editor))
        .unwrap();
    repo.insert_user(user(mocks::OWNER_ID, "owner", Role::Authenticated))
        .unwrap();
    repo.insert_user(user(mocks::OTHER_ID, "other", Role::Authenticated))
        .unwrap();
    repo.insert_category(Category {
        id: CategoryId::new(SEEDED_CATEGORY_ID).unwrap(),
        name: "News".into(),
        slug: "news".into(),
    })
    .unwrap();
    repo.insert_media(Media {
        id: MediaId::new(SEEDED_MEDIA_ID).unwrap(),
        name: "cover.png".into(),
        url: "/uploads/cover.png".into(),
    })
    .unwrap();
}

pub async fn seed_article(repo: &InMemoryArticleRepository, builder: ArticleBuilder) -> Article {
    repo.create(builder.build()).await.expect("seed article")
}

pub fn build_services<R>(repo: Arc<R>) -> Arc<ApplicationServices>
where
    R: ArticleReadRepository + ArticleWriteRepository + 'static,
{
    build_services_with_verifier(repo, Arc::new(mocks::DummyTokenVerifier))
}

pub fn build_services_with_verifier<R>(
    repo: Arc<R>,
    verifier: Arc<dyn TokenVerifier>,
) -> Arc<ApplicationServices>
where
    R: ArticleReadRepository + ArticleWriteRepository + 'static,
{
    let write_repo: Arc<dyn ArticleWriteRepository> = repo.clone();
    let read_repo: Arc<dyn ArticleReadRepository> = repo;
    Arc::new(ApplicationServices::new(
        write_repo,
        read_repo,
        verifier,
        Arc::new(mocks::DummyClock),
        Arc::new(DefaultSlugGenerator),
    ))
}

pub fn make_test_router_with_repo<R>(repo: Arc<R>) -> axum::Router
where
    R: ArticleReadRepository + ArticleWriteRepository + 'static,
{
    build_router(HttpState::new(build_services(repo)), &[])
}

/// Router over a seeded in-memory store; the store is returned for direct
/// inspection.
pub fn make_test_router() -> (axum::Router, Arc<InMemoryArticleRepository>) {
    let repo = Arc::new(InMemoryArticleRepository::new());
    seed_fixtures(&repo);
    (make_test_router_with_repo(Arc::clone(&repo)), repo)
}

pub async fn send(
    app: &axum::Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn read_json(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("expected a JSON body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024).await.expect("read body");
    let ct = parts.headers.get("content-type").and_then(|v| v.to_str().ok()).unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {}", ct);
    let json: Value = serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {}", err_field);
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
