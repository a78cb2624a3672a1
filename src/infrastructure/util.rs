// src/infrastructure/util.rs
use crate::application::ports::util::SlugGenerator;
use slug::slugify;

/// Strict slugification via the `slug` crate: non-ASCII letters are
/// transliterated, everything outside `[a-z0-9]` becomes a single `-`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_stripped_and_runs_collapse() {
        let slugger = DefaultSlugGenerator;
        assert_eq!(slugger.slugify("Hello, World!"), "hello-world");
        assert_eq!(slugger.slugify("  Rust -- 2024  edition "), "rust-2024-edition");
    }

    #[test]
    fn symbol_only_titles_produce_empty_slug() {
        assert_eq!(DefaultSlugGenerator.slugify("!!!"), "");
    }
}
