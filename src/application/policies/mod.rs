// src/application/policies/mod.rs
mod article_access;

pub use article_access::ArticleAccessPolicy;
