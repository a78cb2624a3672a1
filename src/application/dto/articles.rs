use crate::domain::{
    article::{Article, PopulatedArticle},
    category::Category,
    media::Media,
    user::User,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public shape of an article. Relations appear only when they were
/// populated for the request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub reading_time: Option<u32>,
    pub views: u64,
    pub is_edited: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PopulatedArticle> for ArticleDto {
    fn from(populated: PopulatedArticle) -> Self {
        let PopulatedArticle {
            article,
            author,
            category,
            cover_image,
        } = populated;
        Self {
            author: author.map(AuthorDto::from),
            category: category.map(CategoryDto::from),
            cover_image: cover_image.map(MediaDto::from),
            ..Self::from(article)
        }
    }
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            slug: article.slug.into_inner(),
            content: article.content.map(|content| content.into_inner()),
            reading_time: article.reading_time.map(Into::into),
            views: article.views,
            is_edited: article.is_edited,
            author: None,
            category: None,
            cover_image: None,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// Redacted author: everything except id, username and email is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for AuthorDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.into(),
            email: user.email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into(),
            name: category.name,
            slug: category.slug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MediaDto {
    pub id: i64,
    pub name: String,
    pub url: String,
}

impl From<Media> for MediaDto {
    fn from(media: Media) -> Self {
        Self {
            id: media.id.into(),
            name: media.name,
            url: media.url,
        }
    }
}
