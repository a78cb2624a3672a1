use crate::domain::errors::DomainError;

const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_ARTICLE_AUTHOR: &str = "articles_author_id_fkey";
const CNT_ARTICLE_CATEGORY: &str = "articles_category_id_fkey";
const CNT_ARTICLE_COVER_IMAGE: &str = "articles_cover_image_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => classify_database_error(
            db_err.constraint(),
            db_err.code().as_deref(),
            db_err.message(),
        ),
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Known constraint names get a specific message; anything else, including
/// auto-named CHECK constraints, falls back to the SQLSTATE class.
fn classify_database_error(
    constraint: Option<&str>,
    code: Option<&str>,
    message: &str,
) -> DomainError {
    match constraint {
        Some(CNT_ARTICLE_SLUG) => return DomainError::Conflict("slug already exists".into()),
        Some(CNT_ARTICLE_AUTHOR) => return DomainError::NotFound("author not found".into()),
        Some(CNT_ARTICLE_CATEGORY) => return DomainError::NotFound("category not found".into()),
        Some(CNT_ARTICLE_COVER_IMAGE) => {
            return DomainError::NotFound("cover image not found".into());
        }
        _ => {}
    }

    match code {
        Some("23505") => DomainError::Conflict("unique constraint violated".into()),
        Some("23503") => DomainError::NotFound("referenced record not found".into()),
        Some("23514") => match constraint {
            Some(name) => DomainError::Validation(format!("check constraint violated: {name}")),
            None => DomainError::Validation("check constraint violated".into()),
        },
        _ => match constraint {
            Some(name) => DomainError::Persistence(format!("database constraint violation: {name}")),
            None => DomainError::Persistence(message.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_constraints_map_to_specific_errors() {
        let err = classify_database_error(Some(CNT_ARTICLE_SLUG), Some("23505"), "dup");
        assert!(matches!(err, DomainError::Conflict(msg) if msg == "slug already exists"));
        let err = classify_database_error(Some(CNT_ARTICLE_CATEGORY), Some("23503"), "fk");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn auto_named_check_constraint_is_a_validation_error() {
        let err = classify_database_error(Some("articles_views_check"), Some("23514"), "check");
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("articles_views_check")));
    }

    #[test]
    fn unknown_failures_are_persistence_errors() {
        let err = classify_database_error(None, Some("57014"), "canceling statement");
        assert!(matches!(err, DomainError::Persistence(msg) if msg == "canceling statement"));
        let err = classify_database_error(Some("some_exclusion"), Some("23P01"), "excl");
        assert!(matches!(err, DomainError::Persistence(_)));
    }
}
