// tests/support/mocks/article_repos.rs
use async_trait::async_trait;
use newsdesk_core::domain::article::{
    Article, ArticleFilter, ArticleId, ArticleReadRepository, ArticleUpdate,
    ArticleWriteRepository, FindManyParams, NewArticle, Populate, PopulatedArticle,
};
use newsdesk_core::domain::errors::{DomainError, DomainResult};
use newsdesk_core::infrastructure::repositories::InMemoryArticleRepository;
use std::sync::Mutex;

/* -------------------------------- SpyArticleRepo -------------------------------- */

/// In-memory repository that records every call it receives.
#[derive(Default)]
pub struct SpyArticleRepo {
    pub inner: InMemoryArticleRepository,
    calls: Mutex<Vec<&'static str>>,
    find_many_params: Mutex<Vec<FindManyParams>>,
    count_filters: Mutex<Vec<ArticleFilter>>,
    updates: Mutex<Vec<ArticleUpdate>>,
}

impl SpyArticleRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn write_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(**call, "create" | "update" | "delete"))
            .count()
    }

    pub fn last_find_many(&self) -> Option<FindManyParams> {
        self.find_many_params.lock().unwrap().last().cloned()
    }

    pub fn last_count_filter(&self) -> Option<ArticleFilter> {
        self.count_filters.lock().unwrap().last().cloned()
    }

    pub fn last_update(&self) -> Option<ArticleUpdate> {
        self.updates.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ArticleWriteRepository for SpyArticleRepo {
    async fn create(&self, article: NewArticle) -> DomainResult<Article> {
        self.record("create");
        self.inner.create(article).await
    }

    async fn update(
        &self,
        update: ArticleUpdate,
        populate: Populate,
    ) -> DomainResult<PopulatedArticle> {
        self.record("update");
        self.updates.lock().unwrap().push(update.clone());
        self.inner.update(update, populate).await
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        self.record("delete");
        self.inner.delete(id).await
    }
}

#[async_trait]
impl ArticleReadRepository for SpyArticleRepo {
    async fn find_many(&self, params: &FindManyParams) -> DomainResult<Vec<PopulatedArticle>> {
        self.record("find_many");
        self.find_many_params.lock().unwrap().push(params.clone());
        self.inner.find_many(params).await
    }

    async fn count(&self, filter: &ArticleFilter) -> DomainResult<u64> {
        self.record("count");
        self.count_filters.lock().unwrap().push(filter.clone());
        self.inner.count(filter).await
    }

    async fn find_one(
        &self,
        id: ArticleId,
        populate: Populate,
    ) -> DomainResult<Option<PopulatedArticle>> {
        self.record("find_one");
        self.inner.find_one(id, populate).await
    }
}

/* -------------------------------- FailingArticleRepo -------------------------------- */

/// Every operation fails with a persistence error.
pub struct FailingArticleRepo;

fn unavailable<T>() -> DomainResult<T> {
    Err(DomainError::Persistence("store unavailable".into()))
}

#[async_trait]
impl ArticleWriteRepository for FailingArticleRepo {
    async fn create(&self, _article: NewArticle) -> DomainResult<Article> {
        unavailable()
    }

    async fn update(
        &self,
        _update: ArticleUpdate,
        _populate: Populate,
    ) -> DomainResult<PopulatedArticle> {
        unavailable()
    }

    async fn delete(&self, _id: ArticleId) -> DomainResult<Option<Article>> {
        unavailable()
    }
}

#[async_trait]
impl ArticleReadRepository for FailingArticleRepo {
    async fn find_many(&self, _params: &FindManyParams) -> DomainResult<Vec<PopulatedArticle>> {
        unavailable()
    }

    async fn count(&self, _filter: &ArticleFilter) -> DomainResult<u64> {
        unavailable()
    }

    async fn find_one(
        &self,
        _id: ArticleId,
        _populate: Populate,
    ) -> DomainResult<Option<PopulatedArticle>> {
        unavailable()
    }
}
