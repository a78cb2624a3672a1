// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleContent, ArticleField, ArticleFilter, ArticleId, ArticleReadRepository,
    ArticleSlug, ArticleTitle, ArticleUpdate, ArticleWriteRepository, FilterCondition,
    FilterOperator, FilterValue, FindManyParams, NewArticle, Populate, PopulatedArticle,
    ReadingTime, SortSpec,
};
use crate::domain::category::{Category, CategoryId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::media::{Media, MediaId};
use crate::domain::user::{Email, PasswordHash, User, UserId, Username};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;

const ARTICLE_COLUMNS: &str = "id, title, slug, content, reading_time, views, is_edited, author_id, category_id, cover_image_id, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    content: Option<String>,
    reading_time: Option<i32>,
    views: i64,
    is_edited: bool,
    author_id: i64,
    category_id: Option<i64>,
    cover_image_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let reading_time = row
            .reading_time
            .map(|minutes| {
                u32::try_from(minutes)
                    .map_err(|_| DomainError::Persistence("negative reading time".into()))
                    .and_then(ReadingTime::new)
            })
            .transpose()?;
        let views = u64::try_from(row.views)
            .map_err(|_| DomainError::Persistence("negative view count".into()))?;

        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: ArticleSlug::new(row.slug)?,
            content: row.content.map(ArticleContent::new),
            reading_time,
            views,
            is_edited: row.is_edited,
            author_id: UserId::new(row.author_id)?,
            category_id: row.category_id.map(CategoryId::new).transpose()?,
            cover_image_id: row.cover_image_id.map(MediaId::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: Option<String>,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            username: Username::new(row.username)?,
            email: Email::new(row.email)?,
            password_hash: row.password_hash.map(PasswordHash::new).transpose()?,
            role: row.role.parse()?,
        })
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    slug: String,
}

#[derive(Debug, FromRow)]
struct MediaRow {
    id: i64,
    name: String,
    url: String,
}

fn column(field: ArticleField) -> &'static str {
    match field {
        ArticleField::Id => "id",
        ArticleField::Title => "title",
        ArticleField::Slug => "slug",
        ArticleField::Content => "content",
        ArticleField::ReadingTime => "reading_time",
        ArticleField::Views => "views",
        ArticleField::IsEdited => "is_edited",
        ArticleField::Author => "author_id",
        ArticleField::Category => "category_id",
        ArticleField::CoverImage => "cover_image_id",
        ArticleField::CreatedAt => "created_at",
        ArticleField::UpdatedAt => "updated_at",
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn reading_time_column(value: Option<ReadingTime>) -> Option<i32> {
    value.map(|minutes| i32::try_from(minutes.minutes()).unwrap_or(i32::MAX))
}

fn unique_ids(ids: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl PostgresArticleRepository {
    fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: &FilterValue) {
        match value {
            FilterValue::Integer(v) => {
                builder.push_bind(*v);
            }
            FilterValue::Text(v) => {
                builder.push_bind(v.clone());
            }
            FilterValue::Boolean(v) => {
                builder.push_bind(*v);
            }
            FilterValue::Timestamp(v) => {
                builder.push_bind(*v);
            }
        }
    }

    fn push_condition(builder: &mut QueryBuilder<'_, Postgres>, condition: &FilterCondition) {
        let column = column(condition.field);
        let comparison = match condition.op {
            FilterOperator::Null | FilterOperator::NotNull => {
                let flag = matches!(condition.value, FilterValue::Boolean(true));
                let want_null = (condition.op == FilterOperator::Null) == flag;
                builder.push(column);
                builder.push(if want_null { " IS NULL" } else { " IS NOT NULL" });
                return;
            }
            FilterOperator::Eq => " = ",
            FilterOperator::Ne => " <> ",
            FilterOperator::Lt => " < ",
            FilterOperator::Lte => " <= ",
            FilterOperator::Gt => " > ",
            FilterOperator::Gte => " >= ",
            FilterOperator::Contains => {
                builder.push(format!("strpos({column}, "));
                Self::push_value(builder, &condition.value);
                builder.push(") > 0");
                return;
            }
            FilterOperator::ContainsI => {
                builder.push(format!("strpos(lower({column}), lower("));
                Self::push_value(builder, &condition.value);
                builder.push(")) > 0");
                return;
            }
            FilterOperator::NotContains => {
                builder.push(format!("strpos({column}, "));
                Self::push_value(builder, &condition.value);
                builder.push(") = 0");
                return;
            }
            FilterOperator::StartsWith => {
                builder.push(format!("starts_with({column}, "));
                Self::push_value(builder, &condition.value);
                builder.push(")");
                return;
            }
            FilterOperator::EndsWith => {
                builder.push(format!("right({column}, char_length("));
                Self::push_value(builder, &condition.value);
                builder.push(")) = ");
                Self::push_value(builder, &condition.value);
                return;
            }
        };
        builder.push(column);
        builder.push(comparison);
        Self::push_value(builder, &condition.value);
    }

    fn apply_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ArticleFilter) {
        for (index, condition) in filter.conditions().iter().enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });
            Self::push_condition(builder, condition);
        }
    }

    fn apply_ordering(builder: &mut QueryBuilder<'_, Postgres>, sort: &[SortSpec]) {
        builder.push(" ORDER BY ");
        for spec in sort {
            builder.push(column(spec.field));
            builder.push(" ");
            builder.push(spec.direction.as_sql());
            builder.push(", ");
        }
        builder.push("id ASC");
    }

    async fn load_users(&self, ids: Vec<i64>) -> DomainResult<HashMap<i64, User>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash, role FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| User::try_from(row).map(|user| (i64::from(user.id), user)))
            .collect()
    }

    async fn load_categories(&self, ids: Vec<i64>) -> DomainResult<HashMap<i64, Category>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug FROM categories WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| {
                Ok((
                    row.id,
                    Category {
                        id: CategoryId::new(row.id)?,
                        name: row.name,
                        slug: row.slug,
                    },
                ))
            })
            .collect()
    }

    async fn load_media(&self, ids: Vec<i64>) -> DomainResult<HashMap<i64, Media>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, MediaRow>("SELECT id, name, url FROM media WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| {
                Ok((
                    row.id,
                    Media {
                        id: MediaId::new(row.id)?,
                        name: row.name,
                        url: row.url,
                    },
                ))
            })
            .collect()
    }

    /// Relations are loaded with one `ANY($1)` query per relation rather than
    /// joins, so a page costs at most four round trips.
    async fn populate(
        &self,
        articles: Vec<Article>,
        populate: Populate,
    ) -> DomainResult<Vec<PopulatedArticle>> {
        let authors = if populate.author {
            self.load_users(unique_ids(articles.iter().map(|a| i64::from(a.author_id))))
                .await?
        } else {
            HashMap::new()
        };
        let categories = if populate.category {
            self.load_categories(unique_ids(
                articles.iter().filter_map(|a| a.category_id).map(i64::from),
            ))
            .await?
        } else {
            HashMap::new()
        };
        let media = if populate.cover_image {
            self.load_media(unique_ids(
                articles.iter().filter_map(|a| a.cover_image_id).map(i64::from),
            ))
            .await?
        } else {
            HashMap::new()
        };

        Ok(articles
            .into_iter()
            .map(|article| PopulatedArticle {
                author: authors.get(&i64::from(article.author_id)).cloned(),
                category: article
                    .category_id
                    .and_then(|id| categories.get(&i64::from(id)).cloned()),
                cover_image: article
                    .cover_image_id
                    .and_then(|id| media.get(&i64::from(id)).cloned()),
                article,
            })
            .collect())
    }

    async fn populate_one(
        &self,
        article: Article,
        populate: Populate,
    ) -> DomainResult<PopulatedArticle> {
        self.populate(vec![article], populate)
            .await?
            .pop()
            .ok_or_else(|| DomainError::Persistence("populate dropped a record".into()))
    }
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleRepository {
    async fn create(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            content,
            reading_time,
            views,
            is_edited,
            author_id,
            category_id,
            cover_image_id,
            created_at,
            updated_at,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (title, slug, content, reading_time, views, is_edited, author_id, category_id, cover_image_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(title.into_inner())
        .bind(slug.into_inner())
        .bind(content.map(ArticleContent::into_inner))
        .bind(reading_time_column(reading_time))
        .bind(to_i64(views))
        .bind(is_edited)
        .bind(i64::from(author_id))
        .bind(category_id.map(i64::from))
        .bind(cover_image_id.map(i64::from))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(
        &self,
        update: ArticleUpdate,
        populate: Populate,
    ) -> DomainResult<PopulatedArticle> {
        let ArticleUpdate {
            id,
            title,
            slug,
            content,
            reading_time,
            views,
            is_edited,
            category_id,
            cover_image_id,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE articles SET ");
        let mut touched = false;
        {
            let mut set = builder.separated(", ");
            if let Some(title) = title {
                set.push("title = ");
                set.push_bind_unseparated(title.into_inner());
                touched = true;
            }
            if let Some(slug) = slug {
                set.push("slug = ");
                set.push_bind_unseparated(slug.into_inner());
                touched = true;
            }
            if let Some(content) = content {
                set.push("content = ");
                set.push_bind_unseparated(content.into_inner());
                touched = true;
            }
            if let Some(reading_time) = reading_time {
                set.push("reading_time = ");
                set.push_bind_unseparated(reading_time_column(reading_time));
                touched = true;
            }
            if let Some(views) = views {
                set.push("views = ");
                set.push_bind_unseparated(to_i64(views));
                touched = true;
            }
            if let Some(is_edited) = is_edited {
                set.push("is_edited = ");
                set.push_bind_unseparated(is_edited);
                touched = true;
            }
            if let Some(category_id) = category_id {
                set.push("category_id = ");
                set.push_bind_unseparated(category_id.map(i64::from));
                touched = true;
            }
            if let Some(cover_image_id) = cover_image_id {
                set.push("cover_image_id = ");
                set.push_bind_unseparated(cover_image_id.map(i64::from));
                touched = true;
            }
            if let Some(updated_at) = updated_at {
                set.push("updated_at = ");
                set.push_bind_unseparated(updated_at);
                touched = true;
            }
        }

        if !touched {
            return self
                .find_one(id, populate)
                .await?
                .ok_or_else(|| DomainError::NotFound("article not found".into()));
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(format!(" RETURNING {ARTICLE_COLUMNS}"));

        let row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        self.populate_one(Article::try_from(row)?, populate).await
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "DELETE FROM articles WHERE id = $1 RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleRepository {
    async fn find_many(&self, params: &FindManyParams) -> DomainResult<Vec<PopulatedArticle>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles"));
        Self::apply_filter(&mut builder, &params.filter);
        Self::apply_ordering(&mut builder, &params.sort);
        builder.push(" LIMIT ");
        builder.push_bind(to_i64(params.limit));
        builder.push(" OFFSET ");
        builder.push_bind(to_i64(params.offset));

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let articles = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        self.populate(articles, params.populate).await
    }

    async fn count(&self, filter: &ArticleFilter) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM articles");
        Self::apply_filter(&mut builder, filter);

        let total: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        u64::try_from(total).map_err(|_| DomainError::Persistence("negative row count".into()))
    }

    async fn find_one(
        &self,
        id: ArticleId,
        populate: Populate,
    ) -> DomainResult<Option<PopulatedArticle>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(Some(self.populate_one(Article::try_from(row)?, populate).await?)),
            None => Ok(None),
        }
    }
}
