// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::articles::ArticleCommandService,
        policies::ArticleAccessPolicy,
        ports::{ClockPort, SlugGeneratorPort, TokenVerifierPort},
        queries::articles::ArticleQueryService,
    },
    domain::article::{ArticleReadRepository, ArticleWriteRepository, services::ArticleSlugService},
};

/// Everything the HTTP layer needs, wired once at startup.
pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub article_policy: Arc<ArticleAccessPolicy>,
    token_verifier: Arc<TokenVerifierPort>,
}

impl ApplicationServices {
    pub fn new(
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        token_verifier: Arc<TokenVerifierPort>,
        clock: Arc<ClockPort>,
        slugger: Arc<SlugGeneratorPort>,
    ) -> Self {
        let slug_service = Arc::new(ArticleSlugService::new(
            Arc::clone(&slugger),
            Arc::clone(&clock),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            slug_service,
            Arc::clone(&clock),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&article_write_repo),
        ));

        let article_policy = Arc::new(ArticleAccessPolicy::new(Arc::clone(&article_read_repo)));

        Self {
            article_commands,
            article_queries,
            article_policy,
            token_verifier,
        }
    }

    pub fn token_verifier(&self) -> Arc<TokenVerifierPort> {
        Arc::clone(&self.token_verifier)
    }
}
