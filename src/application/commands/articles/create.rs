// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleContent, ArticleTitle, NewArticle},
        category::CategoryId,
        media::MediaId,
    },
};

#[derive(Debug, Clone)]
pub struct CreateArticleCommand {
    pub title: String,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub category: Option<i64>,
    pub cover_image: Option<i64>,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    slug: Option<String>,
    content: Option<String>,
    category: Option<i64>,
    cover_image: Option<i64>,
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn category(mut self, category: i64) -> Self {
        self.category = Some(category);
        self
    }

    pub fn cover_image(mut self, cover_image: i64) -> Self {
        self.cover_image = Some(cover_image);
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            slug: self.slug,
            content: self.content,
            category: self.category,
            cover_image: self.cover_image,
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let actor =
            actor.ok_or_else(|| ApplicationError::unauthorized("You must be authenticated"))?;

        let title = ArticleTitle::new(command.title)?;
        let slug = self.slug_service.resolve(command.slug.as_deref(), &title)?;
        let content = command.content.map(ArticleContent::new);
        let reading_time = content.as_ref().and_then(ArticleContent::reading_time);
        let category_id = command.category.map(CategoryId::new).transpose()?;
        let cover_image_id = command.cover_image.map(MediaId::new).transpose()?;
        let now = self.clock.now();

        let new_article = NewArticle {
            title,
            slug,
            content,
            reading_time,
            views: 0,
            is_edited: false,
            author_id: actor.id,
            category_id,
            cover_image_id,
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.create(new_article).await?;
        tracing::info!(
            article_id = %created.id,
            user_id = %actor.id,
            "Article {} - {} created by {}",
            created.id,
            created.title,
            actor.id
        );
        Ok(created.into())
    }
}
