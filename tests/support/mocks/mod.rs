// tests/support/mocks/mod.rs
//! テスト用モックの再エクスポート
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod article_repos;
pub mod security;
pub mod time;
pub mod util;

pub use article_repos::{FailingArticleRepo, SpyArticleRepo};
pub use security::{
    DummyTokenVerifier, EDITOR_ID, EDITOR_TOKEN, OTHER_ID, OTHER_TOKEN, OWNER_ID, OWNER_TOKEN,
    editor, other, owner,
};
pub use time::fixed_now;
pub use util::{DummyClock, DummySlug};
