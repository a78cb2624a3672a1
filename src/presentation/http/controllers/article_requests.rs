// src/presentation/http/controllers/article_requests.rs
use crate::application::{
    commands::articles::{CreateArticleCommand, UpdateArticleCommand},
    dto::ArticleDto,
    error::{ApplicationError, ApplicationResult},
    queries::articles::ListArticlesQuery,
};
use crate::domain::article::{
    ArticleField, ArticleId, FilterCondition, FilterOperator, PageRequest, SortSpec,
    query::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE},
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Parse a Strapi-style listing query string:
/// `pagination[page]`, `pagination[pageSize]` (or bare `page` / `pageSize`),
/// `sort=field:dir` (repeatable, comma separated, `sort[]`, `sort[N]`),
/// `filters[field]=v` and `filters[field][$op]=v`. Other keys are ignored.
pub fn parse_list_query(raw: Option<&str>) -> ApplicationResult<ListArticlesQuery> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw.unwrap_or_default())
        .map_err(|err| ApplicationError::validation(format!("malformed query string: {err}")))?;

    let mut nested_page = None;
    let mut nested_page_size = None;
    let mut flat_page = None;
    let mut flat_page_size = None;
    let mut query = ListArticlesQuery::default();

    for (key, value) in &pairs {
        match key.as_str() {
            "pagination[page]" => nested_page = Some(parse_integer(key, value)?),
            "pagination[pageSize]" => nested_page_size = Some(parse_integer(key, value)?),
            "page" => flat_page = Some(parse_integer(key, value)?),
            "pageSize" => flat_page_size = Some(parse_integer(key, value)?),
            _ if is_sort_key(key) => {
                for spec in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    query.sort.push(spec.parse::<SortSpec>()?);
                }
            }
            _ if key.starts_with("filters[") => {
                query.filter.push(parse_filter(key, value)?);
            }
            _ => {}
        }
    }

    query.page = PageRequest::new(
        nested_page.or(flat_page).unwrap_or(DEFAULT_PAGE),
        nested_page_size.or(flat_page_size).unwrap_or(DEFAULT_PAGE_SIZE),
    );
    Ok(query)
}

fn parse_integer(key: &str, value: &str) -> ApplicationResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| ApplicationError::validation(format!("{key} must be an integer")))
}

fn is_sort_key(key: &str) -> bool {
    key == "sort"
        || key
            .strip_prefix("sort[")
            .and_then(|rest| rest.strip_suffix(']'))
            .is_some_and(|index| index.chars().all(|c| c.is_ascii_digit()))
}

/// Split `[a][b]...` into its bracketed segments.
fn bracket_segments(mut rest: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let end = inner.find(']')?;
        segments.push(&inner[..end]);
        rest = &inner[end + 1..];
    }
    Some(segments)
}

fn parse_filter(key: &str, value: &str) -> ApplicationResult<FilterCondition> {
    let invalid = || ApplicationError::validation(format!("unsupported filter key '{key}'"));
    let segments = key
        .strip_prefix("filters")
        .and_then(bracket_segments)
        .ok_or_else(invalid)?;

    let (field, op) = match segments.as_slice() {
        [field] => (*field, FilterOperator::Eq),
        [field, op] => (*field, op.parse::<FilterOperator>()?),
        _ => return Err(invalid()),
    };

    Ok(FilterCondition::new(field.parse::<ArticleField>()?, op, value)?)
}

/// Present-but-null becomes `Some(None)`; an absent key stays `None`
/// through `#[serde(default)]`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub cover_image: Option<i64>,
}

/// `{ "data": { ... } }`. Server-managed fields such as `views` or `author`
/// are accepted and dropped.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub data: CreateArticleData,
}

impl From<CreateArticleRequest> for CreateArticleCommand {
    fn from(request: CreateArticleRequest) -> Self {
        let data = request.data;
        CreateArticleCommand {
            title: data.title,
            slug: data.slug,
            content: data.content,
            category: data.category,
            cover_image: data.cover_image,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub category: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub cover_image: Option<Option<i64>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub data: UpdateArticleData,
}

impl UpdateArticleRequest {
    pub fn into_command(self, id: ArticleId) -> UpdateArticleCommand {
        let data = self.data;
        UpdateArticleCommand {
            id: id.into(),
            title: data.title,
            slug: data.slug,
            content: data.content,
            category: data.category,
            cover_image: data.cover_image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponse {
    pub data: ArticleDto,
}
