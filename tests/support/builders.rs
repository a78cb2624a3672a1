// tests/support/builders.rs
use newsdesk_core::domain::article::{ArticleContent, ArticleSlug, ArticleTitle, NewArticle};
use newsdesk_core::domain::category::CategoryId;
use newsdesk_core::domain::media::MediaId;
use newsdesk_core::domain::user::UserId;

use super::mocks::{OWNER_ID, fixed_now};

pub struct ArticleBuilder {
    title: String,
    slug: String,
    content: Option<String>,
    views: u64,
    author_id: i64,
    category_id: Option<i64>,
    cover_image_id: Option<i64>,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self {
            title: "Test Article".into(),
            slug: "test-article".into(),
            content: Some("Test body".into()),
            views: 0,
            author_id: OWNER_ID,
            category_id: None,
            cover_image_id: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn views(mut self, views: u64) -> Self {
        self.views = views;
        self
    }

    pub fn author(mut self, author_id: i64) -> Self {
        self.author_id = author_id;
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn cover_image(mut self, media_id: i64) -> Self {
        self.cover_image_id = Some(media_id);
        self
    }

    pub fn build(self) -> NewArticle {
        let content = self.content.map(ArticleContent::new);
        NewArticle {
            title: ArticleTitle::new(self.title).unwrap(),
            slug: ArticleSlug::new(self.slug).unwrap(),
            reading_time: content.as_ref().and_then(ArticleContent::reading_time),
            content,
            views: self.views,
            is_edited: false,
            author_id: UserId::new(self.author_id).unwrap(),
            category_id: self.category_id.map(|id| CategoryId::new(id).unwrap()),
            cover_image_id: self.cover_image_id.map(|id| MediaId::new(id).unwrap()),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }
}

impl Default for ArticleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
