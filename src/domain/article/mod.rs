// src/domain/article/mod.rs
pub mod entity;
pub mod query;
pub mod repository;
pub mod services;
pub mod specifications;
pub mod value_objects;

pub use entity::{Article, ArticleUpdate, NewArticle, PopulatedArticle};
pub use query::{
    ArticleField, ArticleFilter, FieldKind, FilterCondition, FilterOperator, FilterValue,
    FindManyParams, PageRequest, Populate, SortDirection, SortSpec,
};
pub use repository::{ArticleReadRepository, ArticleWriteRepository};
pub use value_objects::{
    ArticleContent, ArticleId, ArticleSlug, ArticleTitle, ReadingTime, WORDS_PER_MINUTE,
};
