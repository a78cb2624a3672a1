// src/domain/media.rs
use crate::domain::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaId(pub i64);

impl MediaId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("media id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<MediaId> for i64 {
    fn from(value: MediaId) -> Self {
        value.0
    }
}

/// Uploaded file referenced as an article cover image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub id: MediaId,
    pub name: String,
    pub url: String,
}
