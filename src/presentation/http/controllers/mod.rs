// src/presentation/http/controllers/mod.rs
pub mod article_requests;
pub mod articles;
