use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, ArticlePage},
        error::ApplicationResult,
    },
    domain::article::{ArticleFilter, FindManyParams, PageRequest, Populate, SortSpec},
};

#[derive(Debug, Clone, Default)]
pub struct ListArticlesQuery {
    pub page: PageRequest,
    pub filter: ArticleFilter,
    pub sort: Vec<SortSpec>,
}

impl ArticleQueryService {
    /// Page through articles with author, category and cover image populated.
    ///
    /// The page and the total come from two separate repository calls, so under
    /// concurrent writes `total`/`pageCount` may describe a different snapshot
    /// than `data`.
    pub async fn list_articles(&self, query: ListArticlesQuery) -> ApplicationResult<ArticlePage> {
        let ListArticlesQuery { page, filter, sort } = query;

        let params = FindManyParams {
            filter,
            sort,
            limit: page.limit(),
            offset: page.offset(),
            populate: Populate::all(),
        };

        let records = self.read_repo.find_many(&params).await?;
        let total = self.read_repo.count(&params.filter).await?;

        let data = records.into_iter().map(ArticleDto::from).collect();
        Ok(ArticlePage::new(data, page, total))
    }
}
