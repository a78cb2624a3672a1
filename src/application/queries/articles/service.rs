use std::sync::Arc;

use crate::domain::article::{ArticleReadRepository, ArticleWriteRepository};

/// Read side of the article API. Reading one article also bumps its view
/// counter, hence the write repository.
pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        write_repo: Arc<dyn ArticleWriteRepository>,
    ) -> Self {
        Self {
            read_repo,
            write_repo,
        }
    }
}
