// src/domain/article/specifications.rs
use crate::domain::article::entity::Article;
use crate::domain::user::value_objects::{Role, UserId};

pub trait ArticleSpecification {
    fn is_satisfied(&self) -> bool;
}

/// Editors may modify any article; everyone else only the ones they authored.
pub struct CanModifyArticleSpec<'a> {
    role: Role,
    user_id: UserId,
    article: &'a Article,
}

impl<'a> CanModifyArticleSpec<'a> {
    pub fn new(role: Role, user_id: UserId, article: &'a Article) -> Self {
        Self {
            role,
            user_id,
            article,
        }
    }
}

impl ArticleSpecification for CanModifyArticleSpec<'_> {
    fn is_satisfied(&self) -> bool {
        self.role.is_editor() || self.article.is_owned_by(self.user_id)
    }
}
