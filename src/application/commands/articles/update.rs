// src/application/commands/articles/update.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{
            Article, ArticleContent, ArticleId, ArticleSlug, ArticleTitle, ArticleUpdate, Populate,
            ReadingTime,
        },
        category::CategoryId,
        media::MediaId,
    },
};

/// Partial update. `None` leaves a field alone; for the relations
/// `Some(None)` clears the reference.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub category: Option<Option<i64>>,
    pub cover_image: Option<Option<i64>>,
}

impl ArticleCommandService {
    /// Ownership is not checked here; routes run `ArticleAccessPolicy` first.
    pub async fn update_article(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let actor = actor.ok_or_else(|| {
            ApplicationError::unauthorized("You must be authenticated to update an article")
        })?;

        let id = ArticleId::new(command.id)?;
        let existing = self
            .read_repo
            .find_one(id, Populate::none())
            .await?
            .ok_or_else(|| ApplicationError::not_found("Article not found"))?
            .article;

        let UpdateArticleCommand {
            id: _,
            title,
            slug,
            content,
            category,
            cover_image,
        } = command;

        let mut update = ArticleUpdate::new(id);
        update = self.apply_title_and_slug(&existing, title, slug, update)?;
        update = Self::apply_content(&existing, content, update);

        if let Some(category) = category {
            update = update.with_category(category.map(CategoryId::new).transpose()?);
        }
        if let Some(cover_image) = cover_image {
            update = update.with_cover_image(cover_image.map(MediaId::new).transpose()?);
        }

        let update = update
            .with_is_edited(true)
            .with_updated_at(self.clock.now());

        let updated = self.write_repo.update(update, Populate::all()).await?;
        tracing::info!(article_id = %id, user_id = %actor.id, "Article {} edited by {}", id, actor.id);
        Ok(updated.into())
    }

    /// A new slug is derived only when the title actually changes and the
    /// caller did not send one.
    fn apply_title_and_slug(
        &self,
        existing: &Article,
        title: Option<String>,
        slug: Option<String>,
        mut update: ArticleUpdate,
    ) -> ApplicationResult<ArticleUpdate> {
        let requested_slug = slug.filter(|slug| !slug.trim().is_empty());

        if let Some(title) = title {
            let title = ArticleTitle::new(title)?;
            if title != existing.title && requested_slug.is_none() {
                update = update.with_slug(self.slug_service.slug_for(&title)?);
            }
            update = update.with_title(title);
        }

        if let Some(slug) = requested_slug {
            update = update.with_slug(ArticleSlug::new(slug)?);
        }

        Ok(update)
    }

    /// Reading time is recomputed only when the content differs from what is
    /// stored. Changed content always yields an estimate, empty text included.
    fn apply_content(
        existing: &Article,
        content: Option<String>,
        mut update: ArticleUpdate,
    ) -> ArticleUpdate {
        if let Some(content) = content {
            let content = ArticleContent::new(content);
            if existing.content_str() != Some(content.as_str()) {
                let minutes = ReadingTime::from_word_count(content.word_count());
                update = update.with_reading_time(Some(minutes));
            }
            update = update.with_content(content);
        }
        update
    }
}
