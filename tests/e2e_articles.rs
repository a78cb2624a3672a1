use axum::http::{Method, StatusCode};
use newsdesk_core::domain::article::{ArticleReadRepository, Populate};
use serde_json::json;

mod support;

use support::{
    ArticleBuilder, EDITOR_TOKEN, OTHER_ID, OWNER_ID, OWNER_TOKEN, SEEDED_CATEGORY_ID,
    SEEDED_MEDIA_ID, make_test_router, read_json, seed_article, send,
};

/// 一覧がページ情報付きのエンベロープで返ることを確認する
#[tokio::test]
async fn e2e_list_returns_data_and_pagination_meta() {
    let (app, repo) = make_test_router();
    for n in 0..3 {
        seed_article(
            &repo,
            ArticleBuilder::new()
                .title(format!("Post {n}"))
                .slug(format!("post-{n}"))
                .category(SEEDED_CATEGORY_ID)
                .cover_image(SEEDED_MEDIA_ID),
        )
        .await;
    }

    let resp = send(
        &app,
        Method::GET,
        "/api/articles?pagination%5Bpage%5D=1&pagination%5BpageSize%5D=2",
        None,
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        json["meta"]["pagination"],
        json!({ "page": 1, "pageSize": 2, "total": 3, "pageCount": 2 })
    );

    let first = &json["data"][0];
    assert_eq!(
        first["author"],
        json!({ "id": OWNER_ID, "username": "owner", "email": "owner@example.com" })
    );
    assert_eq!(first["category"]["slug"], "news");
    assert_eq!(first["coverImage"]["url"], "/uploads/cover.png");
}

#[tokio::test]
async fn e2e_list_applies_filters_and_sort() {
    let (app, repo) = make_test_router();
    seed_article(&repo, ArticleBuilder::new().title("Rust basics").slug("a").views(3)).await;
    seed_article(&repo, ArticleBuilder::new().title("Go basics").slug("b").views(8)).await;
    seed_article(
        &repo,
        ArticleBuilder::new()
            .title("Advanced rust")
            .slug("c")
            .views(5)
            .author(OTHER_ID),
    )
    .await;

    let resp = send(
        &app,
        Method::GET,
        "/api/articles?filters%5Btitle%5D%5B$containsi%5D=RUST&sort=views:desc",
        None,
        None,
    )
    .await;
    let json = read_json(resp).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Advanced rust", "Rust basics"]);
    assert_eq!(json["meta"]["pagination"]["total"], 2);

    let resp = send(
        &app,
        Method::GET,
        &format!("/api/articles?filters%5Bauthor%5D={OTHER_ID}"),
        None,
        None,
    )
    .await;
    let json = read_json(resp).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["slug"], "c");
}

/// 記事取得のたびに閲覧数が増えることを確認する
#[tokio::test]
async fn e2e_get_counts_views() {
    let (app, repo) = make_test_router();
    let article = seed_article(&repo, ArticleBuilder::new()).await;
    let uri = format!("/api/articles/{}", article.id);

    let first = read_json(send(&app, Method::GET, &uri, None, None).await).await;
    let second = read_json(send(&app, Method::GET, &uri, None, None).await).await;

    assert_eq!(first["data"]["views"], 0);
    assert_eq!(second["data"]["views"], 1);
    assert_eq!(second["data"]["author"]["username"], "owner");
    let stored = repo
        .find_one(article.id, Populate::none())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.article.views, 2);
}

#[tokio::test]
async fn e2e_create_returns_201_with_derived_fields() {
    let (app, repo) = make_test_router();

    let resp = send(
        &app,
        Method::POST,
        "/api/articles",
        Some(OWNER_TOKEN),
        Some(json!({
            "data": {
                "title": "Hello, World!",
                "content": "one two three four five six seven eight nine ten",
                "category": SEEDED_CATEGORY_ID,
                "views": 500,
                "isEdited": true,
                "author": OTHER_ID
            }
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json = read_json(resp).await;
    let data = &json["data"];
    assert_eq!(data["slug"], "hello-world");
    assert_eq!(data["readingTime"], 1);
    assert_eq!(data["views"], 0);
    assert_eq!(data["isEdited"], false);

    let id = newsdesk_core::domain::article::ArticleId::new(data["id"].as_i64().unwrap()).unwrap();
    let stored = repo.find_one(id, Populate::none()).await.unwrap().unwrap();
    assert_eq!(i64::from(stored.article.author_id), OWNER_ID);
}

#[tokio::test]
async fn e2e_owner_updates_own_article() {
    let (app, repo) = make_test_router();
    let article = seed_article(&repo, ArticleBuilder::new().category(SEEDED_CATEGORY_ID)).await;

    let resp = send(
        &app,
        Method::PUT,
        &format!("/api/articles/{}", article.id),
        Some(OWNER_TOKEN),
        Some(json!({ "data": { "title": "Renamed piece", "category": null } })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    assert_eq!(json["data"]["title"], "Renamed piece");
    assert_eq!(json["data"]["slug"], "renamed-piece");
    assert_eq!(json["data"]["isEdited"], true);
    assert!(json["data"].get("category").is_none());
    assert_eq!(json["data"]["author"]["id"], OWNER_ID);
}

#[tokio::test]
async fn e2e_editor_deletes_any_article() {
    let (app, repo) = make_test_router();
    let article = seed_article(&repo, ArticleBuilder::new().title("Doomed")).await;
    let uri = format!("/api/articles/{}", article.id);

    let resp = send(&app, Method::DELETE, &uri, Some(EDITOR_TOKEN), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = read_json(resp).await;
    assert_eq!(json["data"]["title"], "Doomed");

    let resp = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn e2e_health_and_openapi_are_served() {
    let (app, _) = make_test_router();

    let health = read_json(send(&app, Method::GET, "/health", None, None).await).await;
    assert_eq!(health, json!({ "status": "ok" }));

    let doc = read_json(send(&app, Method::GET, "/openapi.json", None, None).await).await;
    assert!(doc["paths"].get("/api/articles").is_some());
    assert!(doc["paths"].get("/api/articles/{id}").is_some());
    assert!(doc["components"]["securitySchemes"].get("bearerAuth").is_some());
}
