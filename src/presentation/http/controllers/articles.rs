// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{DeleteArticleCommand, DeleteOutcome},
    dto::ArticlePage,
    error::ApplicationError,
    queries::articles::GetArticleQuery,
};
use crate::presentation::http::controllers::article_requests::{
    ArticleResponse, CreateArticleRequest, UpdateArticleRequest, parse_list_query,
};
use crate::presentation::http::error::{ErrorResponse, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ArticleIdPath, JsonBody, MaybeAuthenticated};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::RawQuery, http::StatusCode};

#[utoipa::path(
    get,
    path = "/api/articles",
    params(
        ("pagination[page]" = Option<i64>, Query, description = "1-based page number (alias: `page`)"),
        ("pagination[pageSize]" = Option<i64>, Query, description = "Page size, default 10 (alias: `pageSize`)"),
        ("sort" = Option<String>, Query, description = "`field:asc|desc`, comma separated or repeated"),
        ("filters" = Option<String>, Query, description = "`filters[field]=v` or `filters[field][$op]=v`")
    ),
    responses(
        (status = 200, description = "One page of articles.", body = ArticlePage),
        (status = 400, description = "Malformed query.", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    RawQuery(raw): RawQuery,
) -> HttpResult<Json<ArticlePage>> {
    let query = parse_list_query(raw.as_deref()).into_http()?;

    state
        .services
        .article_queries
        .list_articles(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article; counts as one view.", body = ArticleResponse),
        (status = 404, description = "No such article.", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    ArticleIdPath(id): ArticleIdPath,
) -> HttpResult<Json<ArticleResponse>> {
    let data = state
        .services
        .article_queries
        .get_article(GetArticleQuery { id: id.into() })
        .await
        .into_http()?;

    Ok(Json(ArticleResponse { data }))
}

#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created.", body = ArticleResponse),
        (status = 400, description = "Invalid body.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
        (status = 409, description = "Slug already taken.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(actor): MaybeAuthenticated,
    JsonBody(payload): JsonBody<CreateArticleRequest>,
) -> HttpResult<(StatusCode, Json<ArticleResponse>)> {
    let data = state
        .services
        .article_commands
        .create_article(actor.as_ref(), payload.into())
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(ArticleResponse { data })))
}

#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Article updated.", body = ArticleResponse),
        (status = 400, description = "Invalid body.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
        (status = 403, description = "Neither the author nor an editor.", body = ErrorResponse),
        (status = 404, description = "No such article.", body = ErrorResponse),
        (status = 409, description = "Slug already taken.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(actor): MaybeAuthenticated,
    ArticleIdPath(id): ArticleIdPath,
    JsonBody(payload): JsonBody<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleResponse>> {
    state
        .services
        .article_policy
        .can_modify(actor.as_ref(), id)
        .await
        .into_http()?;

    let data = state
        .services
        .article_commands
        .update_article(actor.as_ref(), payload.into_command(id))
        .await
        .into_http()?;

    Ok(Json(ArticleResponse { data }))
}

#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "The deleted article.", body = ArticleResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
        (status = 403, description = "Neither the author nor an editor.", body = ErrorResponse),
        (status = 404, description = "No such article.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(actor): MaybeAuthenticated,
    ArticleIdPath(id): ArticleIdPath,
) -> HttpResult<Json<ArticleResponse>> {
    state
        .services
        .article_policy
        .can_modify(actor.as_ref(), id)
        .await
        .into_http()?;

    let outcome = state
        .services
        .article_commands
        .delete_article(DeleteArticleCommand { id: id.into() })
        .await
        .into_http()?;

    match outcome {
        DeleteOutcome::Deleted(data) => Ok(Json(ArticleResponse { data })),
        DeleteOutcome::NotFound(id) => Err(HttpError::from_error(ApplicationError::not_found(
            format!("Article {id} not found"),
        ))),
    }
}
