// src/domain/article/services/mod.rs
use std::sync::Arc;

use crate::application::ports::{time::Clock, util::SlugGenerator};
use crate::domain::article::value_objects::{ArticleSlug, ArticleTitle};
use crate::domain::errors::DomainResult;

/// Domain service deriving URL slugs from article titles.
///
/// Uniqueness is left to the repository; a clash surfaces as a conflict on
/// write.
pub struct ArticleSlugService {
    generator: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
}

impl ArticleSlugService {
    pub fn new(generator: Arc<dyn SlugGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { generator, clock }
    }

    pub fn slug_for(&self, title: &ArticleTitle) -> DomainResult<ArticleSlug> {
        let base = self.generator.slugify(title.as_str());
        if base.is_empty() {
            // titles made only of punctuation or symbols slugify to nothing
            ArticleSlug::new(format!("article-{}", self.clock.now().timestamp()))
        } else {
            ArticleSlug::new(base)
        }
    }

    /// A client-supplied slug wins; blank or missing ones are derived.
    pub fn resolve(
        &self,
        requested: Option<&str>,
        title: &ArticleTitle,
    ) -> DomainResult<ArticleSlug> {
        match requested.filter(|slug| !slug.trim().is_empty()) {
            Some(slug) => ArticleSlug::new(slug),
            None => self.slug_for(title),
        }
    }
}
