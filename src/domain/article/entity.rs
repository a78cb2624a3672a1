// src/domain/article/entity.rs
use crate::domain::article::value_objects::{
    ArticleContent, ArticleId, ArticleSlug, ArticleTitle, ReadingTime,
};
use crate::domain::category::{Category, CategoryId};
use crate::domain::media::{Media, MediaId};
use crate::domain::user::{User, UserId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub content: Option<ArticleContent>,
    pub reading_time: Option<ReadingTime>,
    pub views: u64,
    pub is_edited: bool,
    pub author_id: UserId,
    pub category_id: Option<CategoryId>,
    pub cover_image_id: Option<MediaId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    pub fn content_str(&self) -> Option<&str> {
        self.content.as_ref().map(ArticleContent::as_str)
    }
}

/// An article together with whichever relations the caller asked to populate.
/// A `None` relation is either not requested or not set on the record.
#[derive(Debug, Clone)]
pub struct PopulatedArticle {
    pub article: Article,
    pub author: Option<User>,
    pub category: Option<Category>,
    pub cover_image: Option<Media>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub content: Option<ArticleContent>,
    pub reading_time: Option<ReadingTime>,
    pub views: u64,
    pub is_edited: bool,
    pub author_id: UserId,
    pub category_id: Option<CategoryId>,
    pub cover_image_id: Option<MediaId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial write against an existing article. Author is deliberately absent:
/// ownership cannot change after creation.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub slug: Option<ArticleSlug>,
    pub content: Option<ArticleContent>,
    pub reading_time: Option<Option<ReadingTime>>,
    pub views: Option<u64>,
    pub is_edited: Option<bool>,
    pub category_id: Option<Option<CategoryId>>,
    pub cover_image_id: Option<Option<MediaId>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            content: None,
            reading_time: None,
            views: None,
            is_edited: None,
            category_id: None,
            cover_image_id: None,
            updated_at: None,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: ArticleSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_content(mut self, content: ArticleContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_reading_time(mut self, reading_time: Option<ReadingTime>) -> Self {
        self.reading_time = Some(reading_time);
        self
    }

    pub fn with_views(mut self, views: u64) -> Self {
        self.views = Some(views);
        self
    }

    pub fn with_is_edited(mut self, is_edited: bool) -> Self {
        self.is_edited = Some(is_edited);
        self
    }

    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_cover_image(mut self, cover_image_id: Option<MediaId>) -> Self {
        self.cover_image_id = Some(cover_image_id);
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Apply the update to an in-memory copy of the record.
    pub fn apply_to(&self, article: &mut Article) {
        if let Some(title) = &self.title {
            article.title = title.clone();
        }
        if let Some(slug) = &self.slug {
            article.slug = slug.clone();
        }
        if let Some(content) = &self.content {
            article.content = Some(content.clone());
        }
        if let Some(reading_time) = self.reading_time {
            article.reading_time = reading_time;
        }
        if let Some(views) = self.views {
            article.views = views;
        }
        if let Some(is_edited) = self.is_edited {
            article.is_edited = is_edited;
        }
        if let Some(category_id) = self.category_id {
            article.category_id = category_id;
        }
        if let Some(cover_image_id) = self.cover_image_id {
            article.cover_image_id = cover_image_id;
        }
        if let Some(updated_at) = self.updated_at {
            article.updated_at = updated_at;
        }
    }
}
