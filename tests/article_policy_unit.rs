use std::sync::Arc;

mod support;

use newsdesk_core::application::error::ApplicationError;
use newsdesk_core::domain::article::ArticleId;
use support::{
    ArticleBuilder, EDITOR_ID, SpyArticleRepo, build_services, editor, other, owner,
    seed_article,
};

async fn services_with_owned_article() -> (
    Arc<newsdesk_core::application::services::ApplicationServices>,
    ArticleId,
) {
    let spy = Arc::new(SpyArticleRepo::new());
    support::seed_fixtures(&spy.inner);
    let article = seed_article(&spy.inner, ArticleBuilder::new()).await;
    (build_services(spy), article.id)
}

/// 編集者は所有者でなくても記事を変更できることを確認する
#[tokio::test]
async fn editor_may_modify_any_article() {
    let (services, id) = services_with_owned_article().await;
    assert_ne!(i64::from(editor().id), support::OWNER_ID);
    assert_eq!(i64::from(editor().id), EDITOR_ID);

    let allowed = services
        .article_policy
        .can_modify(Some(&editor()), id)
        .await
        .unwrap();
    assert!(allowed);
}

#[tokio::test]
async fn owner_may_modify_own_article() {
    let (services, id) = services_with_owned_article().await;

    let allowed = services
        .article_policy
        .can_modify(Some(&owner()), id)
        .await
        .unwrap();
    assert!(allowed);
}

#[tokio::test]
async fn other_authenticated_user_is_forbidden() {
    let (services, id) = services_with_owned_article().await;

    let err = services
        .article_policy
        .can_modify(Some(&other()), id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn anonymous_caller_is_unauthorized() {
    let (services, id) = services_with_owned_article().await;

    let err = services
        .article_policy
        .can_modify(None, id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Unauthorized(_)));
}

#[tokio::test]
async fn missing_article_is_not_found_even_for_editors() {
    let (services, _) = services_with_owned_article().await;
    let missing = ArticleId::new(999).unwrap();

    for actor in [editor(), owner(), other()] {
        let err = services
            .article_policy
            .can_modify(Some(&actor), missing)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }
}
