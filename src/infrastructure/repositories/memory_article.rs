// src/infrastructure/repositories/memory_article.rs
use crate::domain::article::{
    Article, ArticleField, ArticleFilter, ArticleId, ArticleReadRepository, ArticleUpdate,
    ArticleWriteRepository, FilterCondition, FilterOperator, FilterValue, FindManyParams,
    NewArticle, Populate, PopulatedArticle, SortDirection, SortSpec,
};
use crate::domain::category::Category;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::media::Media;
use crate::domain::user::User;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct StoreState {
    next_id: i64,
    articles: BTreeMap<i64, Article>,
    users: BTreeMap<i64, User>,
    categories: BTreeMap<i64, Category>,
    media: BTreeMap<i64, Media>,
}

impl StoreState {
    fn slug_taken(&self, slug: &str, except: Option<ArticleId>) -> bool {
        self.articles
            .values()
            .any(|a| a.slug.as_str() == slug && Some(a.id) != except)
    }

    fn populate(&self, article: Article, populate: Populate) -> PopulatedArticle {
        PopulatedArticle {
            author: populate
                .author
                .then(|| self.users.get(&i64::from(article.author_id)).cloned())
                .flatten(),
            category: article
                .category_id
                .filter(|_| populate.category)
                .and_then(|id| self.categories.get(&i64::from(id)).cloned()),
            cover_image: article
                .cover_image_id
                .filter(|_| populate.cover_image)
                .and_then(|id| self.media.get(&i64::from(id)).cloned()),
            article,
        }
    }
}

/// Process-local article store with the same observable behaviour as the
/// Postgres repository: slug uniqueness, `id ASC` tie-breaking and nulls
/// sorting last on ascending keys. Foreign keys are not enforced.
#[derive(Default)]
pub struct InMemoryArticleRepository {
    state: RwLock<StoreState>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| DomainError::Persistence("article store lock poisoned".into()))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| DomainError::Persistence("article store lock poisoned".into()))
    }

    pub fn insert_user(&self, user: User) -> DomainResult<()> {
        self.write()?.users.insert(i64::from(user.id), user);
        Ok(())
    }

    pub fn insert_category(&self, category: Category) -> DomainResult<()> {
        self.write()?
            .categories
            .insert(i64::from(category.id), category);
        Ok(())
    }

    pub fn insert_media(&self, media: Media) -> DomainResult<()> {
        self.write()?.media.insert(i64::from(media.id), media);
        Ok(())
    }
}

fn field_value(article: &Article, field: ArticleField) -> Option<FilterValue> {
    match field {
        ArticleField::Id => Some(FilterValue::Integer(i64::from(article.id))),
        ArticleField::Title => Some(FilterValue::Text(article.title.as_str().to_string())),
        ArticleField::Slug => Some(FilterValue::Text(article.slug.as_str().to_string())),
        ArticleField::Content => article
            .content_str()
            .map(|content| FilterValue::Text(content.to_string())),
        ArticleField::ReadingTime => article
            .reading_time
            .map(|minutes| FilterValue::Integer(i64::from(minutes.minutes()))),
        ArticleField::Views => Some(FilterValue::Integer(
            i64::try_from(article.views).unwrap_or(i64::MAX),
        )),
        ArticleField::IsEdited => Some(FilterValue::Boolean(article.is_edited)),
        ArticleField::Author => Some(FilterValue::Integer(i64::from(article.author_id))),
        ArticleField::Category => article
            .category_id
            .map(|id| FilterValue::Integer(i64::from(id))),
        ArticleField::CoverImage => article
            .cover_image_id
            .map(|id| FilterValue::Integer(i64::from(id))),
        ArticleField::CreatedAt => Some(FilterValue::Timestamp(article.created_at)),
        ArticleField::UpdatedAt => Some(FilterValue::Timestamp(article.updated_at)),
    }
}

fn compare_values(left: &FilterValue, right: &FilterValue) -> Option<Ordering> {
    match (left, right) {
        (FilterValue::Integer(a), FilterValue::Integer(b)) => Some(a.cmp(b)),
        (FilterValue::Text(a), FilterValue::Text(b)) => Some(a.cmp(b)),
        (FilterValue::Boolean(a), FilterValue::Boolean(b)) => Some(a.cmp(b)),
        (FilterValue::Timestamp(a), FilterValue::Timestamp(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn text_matches(actual: Option<&FilterValue>, expected: &FilterValue, test: fn(&str, &str) -> bool) -> bool {
    match (actual, expected) {
        (Some(FilterValue::Text(haystack)), FilterValue::Text(needle)) => test(haystack, needle),
        _ => false,
    }
}

// NULL never satisfies a comparison, mirroring SQL three-valued logic.
fn matches_condition(article: &Article, condition: &FilterCondition) -> bool {
    let actual = field_value(article, condition.field);
    let ordering = || {
        actual
            .as_ref()
            .and_then(|value| compare_values(value, &condition.value))
    };

    match condition.op {
        FilterOperator::Null | FilterOperator::NotNull => {
            let flag = matches!(condition.value, FilterValue::Boolean(true));
            let want_null = (condition.op == FilterOperator::Null) == flag;
            actual.is_none() == want_null
        }
        FilterOperator::Eq => ordering() == Some(Ordering::Equal),
        FilterOperator::Ne => ordering().is_some_and(Ordering::is_ne),
        FilterOperator::Lt => ordering().is_some_and(Ordering::is_lt),
        FilterOperator::Lte => ordering().is_some_and(Ordering::is_le),
        FilterOperator::Gt => ordering().is_some_and(Ordering::is_gt),
        FilterOperator::Gte => ordering().is_some_and(Ordering::is_ge),
        FilterOperator::Contains => {
            text_matches(actual.as_ref(), &condition.value, |h, n| h.contains(n))
        }
        FilterOperator::ContainsI => text_matches(actual.as_ref(), &condition.value, |h, n| {
            h.to_lowercase().contains(&n.to_lowercase())
        }),
        FilterOperator::NotContains => {
            text_matches(actual.as_ref(), &condition.value, |h, n| !h.contains(n))
        }
        FilterOperator::StartsWith => {
            text_matches(actual.as_ref(), &condition.value, |h, n| h.starts_with(n))
        }
        FilterOperator::EndsWith => {
            text_matches(actual.as_ref(), &condition.value, |h, n| h.ends_with(n))
        }
    }
}

fn matches_filter(article: &Article, filter: &ArticleFilter) -> bool {
    filter
        .conditions()
        .iter()
        .all(|condition| matches_condition(article, condition))
}

fn compare_articles(left: &Article, right: &Article, sort: &[SortSpec]) -> Ordering {
    for spec in sort {
        let ordering = match (
            field_value(left, spec.field),
            field_value(right, spec.field),
        ) {
            (Some(a), Some(b)) => compare_values(&a, &b).unwrap_or(Ordering::Equal),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
        };
        let ordering = match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.id.cmp(&right.id)
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleRepository {
    async fn create(&self, article: NewArticle) -> DomainResult<Article> {
        let mut state = self.write()?;
        if state.slug_taken(article.slug.as_str(), None) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        state.next_id += 1;
        let id = ArticleId::new(state.next_id)?;
        let stored = Article {
            id,
            title: article.title,
            slug: article.slug,
            content: article.content,
            reading_time: article.reading_time,
            views: article.views,
            is_edited: article.is_edited,
            author_id: article.author_id,
            category_id: article.category_id,
            cover_image_id: article.cover_image_id,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        state.articles.insert(i64::from(id), stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        update: ArticleUpdate,
        populate: Populate,
    ) -> DomainResult<PopulatedArticle> {
        let mut state = self.write()?;
        if let Some(slug) = &update.slug {
            if state.slug_taken(slug.as_str(), Some(update.id)) {
                return Err(DomainError::Conflict("slug already exists".into()));
            }
        }

        let article = state
            .articles
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        update.apply_to(article);
        let updated = article.clone();

        Ok(state.populate(updated, populate))
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.write()?.articles.remove(&i64::from(id)))
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleRepository {
    async fn find_many(&self, params: &FindManyParams) -> DomainResult<Vec<PopulatedArticle>> {
        let state = self.read()?;
        let mut matched: Vec<&Article> = state
            .articles
            .values()
            .filter(|article| matches_filter(article, &params.filter))
            .collect();
        matched.sort_by(|a, b| compare_articles(a, b, &params.sort));

        let offset = usize::try_from(params.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(params.limit).unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|article| state.populate(article.clone(), params.populate))
            .collect())
    }

    async fn count(&self, filter: &ArticleFilter) -> DomainResult<u64> {
        let state = self.read()?;
        let total = state
            .articles
            .values()
            .filter(|article| matches_filter(article, filter))
            .count();
        Ok(u64::try_from(total).unwrap_or(u64::MAX))
    }

    async fn find_one(
        &self,
        id: ArticleId,
        populate: Populate,
    ) -> DomainResult<Option<PopulatedArticle>> {
        let state = self.read()?;
        Ok(state
            .articles
            .get(&i64::from(id))
            .map(|article| state.populate(article.clone(), populate)))
    }
}
