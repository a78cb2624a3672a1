use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ArticleDto;
use crate::domain::article::PageRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub page_count: u64,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page(),
            page_size: request.page_size(),
            total,
            page_count: request.page_count(total),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListMeta {
    pub pagination: PaginationMeta,
}

/// Listing envelope: `{ data: [...], meta: { pagination } }`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticlePage {
    pub data: Vec<ArticleDto>,
    pub meta: ListMeta,
}

impl ArticlePage {
    pub fn new(data: Vec<ArticleDto>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            meta: ListMeta {
                pagination: PaginationMeta::new(request, total),
            },
        }
    }
}
