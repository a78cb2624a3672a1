// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of `createdAt` / `updatedAt` stamps; swapped for a fixed clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
