pub mod articles;
pub mod auth;
pub mod pagination;

pub use articles::{ArticleDto, AuthorDto, CategoryDto, MediaDto};
pub use auth::AuthenticatedUser;
pub use pagination::{ArticlePage, ListMeta, PaginationMeta};
