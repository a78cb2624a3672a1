// src/application/commands/articles/delete.rs
use super::ArticleCommandService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::article::ArticleId,
};

pub struct DeleteArticleCommand {
    pub id: i64,
}

/// A missing article is a normal outcome of delete, not an error.
#[derive(Debug, Clone)]
pub enum DeleteOutcome {
    Deleted(ArticleDto),
    NotFound(ArticleId),
}

impl ArticleCommandService {
    pub async fn delete_article(
        &self,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<DeleteOutcome> {
        let id = ArticleId::new(command.id)?;

        match self.write_repo.delete(id).await? {
            Some(deleted) => {
                tracing::info!(article_id = %id, "Article {} deleted", id);
                Ok(DeleteOutcome::Deleted(deleted.into()))
            }
            None => {
                tracing::info!(article_id = %id, "can not delete article {}. Article not found", id);
                Ok(DeleteOutcome::NotFound(id))
            }
        }
    }
}
