// src/application/commands/articles/mod.rs
mod create;
mod delete;
mod service;
mod update;

pub use create::{CreateArticleCommand, CreateArticleCommandBuilder};
pub use delete::{DeleteArticleCommand, DeleteOutcome};
pub use service::ArticleCommandService;
pub use update::UpdateArticleCommand;
