// src/domain/article/repository.rs
use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle, PopulatedArticle};
use crate::domain::article::query::{ArticleFilter, FindManyParams, Populate};
use crate::domain::article::value_objects::ArticleId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn create(&self, article: NewArticle) -> DomainResult<Article>;
    /// Fails with `DomainError::NotFound` when no article has `update.id`.
    async fn update(&self, update: ArticleUpdate, populate: Populate)
    -> DomainResult<PopulatedArticle>;
    /// Returns the removed record, or `None` when nothing matched.
    async fn delete(&self, id: ArticleId) -> DomainResult<Option<Article>>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_many(&self, params: &FindManyParams) -> DomainResult<Vec<PopulatedArticle>>;
    async fn count(&self, filter: &ArticleFilter) -> DomainResult<u64>;
    async fn find_one(
        &self,
        id: ArticleId,
        populate: Populate,
    ) -> DomainResult<Option<PopulatedArticle>>;
}
