use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleId, ArticleUpdate, Populate},
};

pub struct GetArticleQuery {
    pub id: i64,
}

impl ArticleQueryService {
    /// Fetch one article and count the view.
    ///
    /// The counter is written back as `read + 1` without a compare-and-swap, so
    /// concurrent reads of the same article can lose increments. The returned
    /// payload carries the view count as it was before this read.
    pub async fn get_article(&self, query: GetArticleQuery) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(query.id)?;
        let article = self
            .read_repo
            .find_one(id, Populate::all())
            .await?
            .ok_or_else(|| ApplicationError::not_found("Article not found"))?;

        let views = article.article.views.saturating_add(1);
        self.write_repo
            .update(ArticleUpdate::new(id).with_views(views), Populate::none())
            .await?;

        Ok(article.into())
    }
}
