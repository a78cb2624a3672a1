// src/domain/article/query.rs
//! Typed listing parameters handed to the article repositories: filters,
//! sort keys, offset pagination and relation population.
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Offset pagination request. Page and page size are always at least one,
/// whatever the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: at_least_one(page),
            page_size: at_least_one(page_size),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

fn at_least_one(value: i64) -> u64 {
    u64::try_from(value.max(1)).unwrap_or(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Boolean,
    Timestamp,
}

/// Article attributes that may appear in filters and sort keys. Relations
/// filter and sort by their id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleField {
    Id,
    Title,
    Slug,
    Content,
    ReadingTime,
    Views,
    IsEdited,
    Author,
    Category,
    CoverImage,
    CreatedAt,
    UpdatedAt,
}

impl ArticleField {
    pub const ALL: [ArticleField; 12] = [
        ArticleField::Id,
        ArticleField::Title,
        ArticleField::Slug,
        ArticleField::Content,
        ArticleField::ReadingTime,
        ArticleField::Views,
        ArticleField::IsEdited,
        ArticleField::Author,
        ArticleField::Category,
        ArticleField::CoverImage,
        ArticleField::CreatedAt,
        ArticleField::UpdatedAt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ArticleField::Id => "id",
            ArticleField::Title => "title",
            ArticleField::Slug => "slug",
            ArticleField::Content => "content",
            ArticleField::ReadingTime => "readingTime",
            ArticleField::Views => "views",
            ArticleField::IsEdited => "isEdited",
            ArticleField::Author => "author",
            ArticleField::Category => "category",
            ArticleField::CoverImage => "coverImage",
            ArticleField::CreatedAt => "createdAt",
            ArticleField::UpdatedAt => "updatedAt",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            ArticleField::Title | ArticleField::Slug | ArticleField::Content => FieldKind::Text,
            ArticleField::IsEdited => FieldKind::Boolean,
            ArticleField::CreatedAt | ArticleField::UpdatedAt => FieldKind::Timestamp,
            ArticleField::Id
            | ArticleField::ReadingTime
            | ArticleField::Views
            | ArticleField::Author
            | ArticleField::Category
            | ArticleField::CoverImage => FieldKind::Integer,
        }
    }
}

impl fmt::Display for ArticleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArticleField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "reading_time" => ArticleField::ReadingTime,
            "is_edited" => ArticleField::IsEdited,
            "cover_image" => ArticleField::CoverImage,
            "created_at" => ArticleField::CreatedAt,
            "updated_at" => ArticleField::UpdatedAt,
            other => ArticleField::ALL
                .into_iter()
                .find(|field| field.name() == other)
                .ok_or_else(|| {
                    DomainError::Validation(format!("unknown article field '{other}'"))
                })?,
        };
        Ok(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Contains,
    ContainsI,
    NotContains,
    StartsWith,
    EndsWith,
    Null,
    NotNull,
}

impl FilterOperator {
    pub fn token(self) -> &'static str {
        match self {
            FilterOperator::Eq => "$eq",
            FilterOperator::Ne => "$ne",
            FilterOperator::Lt => "$lt",
            FilterOperator::Lte => "$lte",
            FilterOperator::Gt => "$gt",
            FilterOperator::Gte => "$gte",
            FilterOperator::Contains => "$contains",
            FilterOperator::ContainsI => "$containsi",
            FilterOperator::NotContains => "$notContains",
            FilterOperator::StartsWith => "$startsWith",
            FilterOperator::EndsWith => "$endsWith",
            FilterOperator::Null => "$null",
            FilterOperator::NotNull => "$notNull",
        }
    }

    pub fn is_text_only(self) -> bool {
        matches!(
            self,
            FilterOperator::Contains
                | FilterOperator::ContainsI
                | FilterOperator::NotContains
                | FilterOperator::StartsWith
                | FilterOperator::EndsWith
        )
    }

    pub fn is_null_check(self) -> bool {
        matches!(self, FilterOperator::Null | FilterOperator::NotNull)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for FilterOperator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "$eq" => FilterOperator::Eq,
            "$ne" => FilterOperator::Ne,
            "$lt" => FilterOperator::Lt,
            "$lte" => FilterOperator::Lte,
            "$gt" => FilterOperator::Gt,
            "$gte" => FilterOperator::Gte,
            "$contains" => FilterOperator::Contains,
            "$containsi" => FilterOperator::ContainsI,
            "$notContains" => FilterOperator::NotContains,
            "$startsWith" => FilterOperator::StartsWith,
            "$endsWith" => FilterOperator::EndsWith,
            "$null" => FilterOperator::Null,
            "$notNull" => FilterOperator::NotNull,
            other => {
                return Err(DomainError::Validation(format!(
                    "unknown filter operator '{other}'"
                )));
            }
        };
        Ok(op)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Integer(i64),
    Text(String),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl FilterValue {
    pub fn parse(kind: FieldKind, raw: &str) -> DomainResult<Self> {
        match kind {
            FieldKind::Text => Ok(FilterValue::Text(raw.to_string())),
            FieldKind::Integer => raw.trim().parse::<i64>().map(FilterValue::Integer).map_err(
                |_| DomainError::Validation(format!("'{raw}' is not a valid integer")),
            ),
            FieldKind::Boolean => match raw.trim() {
                "true" | "1" => Ok(FilterValue::Boolean(true)),
                "false" | "0" => Ok(FilterValue::Boolean(false)),
                _ => Err(DomainError::Validation(format!(
                    "'{raw}' is not a valid boolean"
                ))),
            },
            FieldKind::Timestamp => DateTime::parse_from_rfc3339(raw.trim())
                .map(|at| FilterValue::Timestamp(at.with_timezone(&Utc)))
                .map_err(|_| {
                    DomainError::Validation(format!("'{raw}' is not an RFC 3339 timestamp"))
                }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub field: ArticleField,
    pub op: FilterOperator,
    pub value: FilterValue,
}

impl FilterCondition {
    /// Validate the operator against the field kind and parse the raw value.
    /// `$null` / `$notNull` take a boolean whatever the field kind.
    pub fn new(field: ArticleField, op: FilterOperator, raw: &str) -> DomainResult<Self> {
        if op.is_text_only() && field.kind() != FieldKind::Text {
            return Err(DomainError::Validation(format!(
                "operator {op} only applies to text fields, '{field}' is not one"
            )));
        }
        let kind = if op.is_null_check() {
            FieldKind::Boolean
        } else {
            field.kind()
        };
        let value = FilterValue::parse(kind, raw)?;
        Ok(Self { field, op, value })
    }
}

/// Conjunction of conditions; an empty filter matches every article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    conditions: Vec<FilterCondition>,
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, condition: FilterCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn push(&mut self, condition: FilterCondition) {
        self.conditions.push(condition);
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than exactly `desc` sorts ascending.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: ArticleField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: ArticleField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: ArticleField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for SortSpec {
    type Err = DomainError;

    /// Parses `field` or `field:direction`; segments after the second are
    /// ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split(':');
        let field = segments.next().unwrap_or_default();
        let direction = segments.next();
        Ok(Self {
            field: field.trim().parse()?,
            direction: SortDirection::from_token(direction),
        })
    }
}

/// Relations to load alongside each article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Populate {
    pub author: bool,
    pub category: bool,
    pub cover_image: bool,
}

impl Populate {
    pub fn all() -> Self {
        Self {
            author: true,
            category: true,
            cover_image: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FindManyParams {
    pub filter: ArticleFilter,
    pub sort: Vec<SortSpec>,
    pub limit: u64,
    pub offset: u64,
    pub populate: Populate,
}
