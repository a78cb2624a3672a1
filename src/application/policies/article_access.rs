// src/application/policies/article_access.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{
        ArticleId, ArticleReadRepository, Populate,
        specifications::{ArticleSpecification, CanModifyArticleSpec},
    },
};

/// Route policy guarding article mutations: editors may touch anything,
/// other principals only what they authored.
pub struct ArticleAccessPolicy {
    read_repo: Arc<dyn ArticleReadRepository>,
}

impl ArticleAccessPolicy {
    pub fn new(read_repo: Arc<dyn ArticleReadRepository>) -> Self {
        Self { read_repo }
    }

    /// `Ok(true)` when allowed. Denials are errors: `Unauthorized` without a
    /// principal, `NotFound` for a missing article, `Forbidden` otherwise.
    pub async fn can_modify(
        &self,
        actor: Option<&AuthenticatedUser>,
        id: ArticleId,
    ) -> ApplicationResult<bool> {
        let actor = actor.ok_or_else(|| ApplicationError::unauthorized("You must be authenticated"))?;

        let article = self
            .read_repo
            .find_one(id, Populate::none())
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("Article {id} not found")))?
            .article;

        if CanModifyArticleSpec::new(actor.role, actor.id, &article).is_satisfied() {
            return Ok(true);
        }

        tracing::debug!(article_id = %id, user_id = %actor.id, "article modification denied");
        Err(ApplicationError::forbidden("You cannot modify this article"))
    }
}
