// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    /// Lowercase, strip everything outside `[a-z0-9]` and join the remaining
    /// runs with `-`.
    fn slugify(&self, input: &str) -> String;
}
