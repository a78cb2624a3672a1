// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedUser, error::ApplicationError},
    domain::article::ArticleId,
    presentation::http::state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde::de::DeserializeOwned;

use super::error::HttpError;

/// The caller, when a bearer token was sent. A token that is present but
/// fails verification is rejected with 401 rather than treated as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                HttpError::from_error(ApplicationError::infrastructure(
                    "application state missing",
                ))
            })?;

        let Some(header) = parts.headers.typed_get::<Authorization<Bearer>>() else {
            return Ok(Self(None));
        };

        let user = app_state
            .services
            .token_verifier()
            .authenticate(header.token())
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(Some(user)))
    }
}

/// `{id}` path segment parsed as a positive article id.
#[derive(Debug, Clone, Copy)]
pub struct ArticleIdPath(pub ArticleId);

impl<S> FromRequestParts<S> for ArticleIdPath
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                HttpError::from_error(ApplicationError::validation("article id must be an integer"))
            })?;

        let id = ArticleId::new(raw).map_err(|err| HttpError::from_error(err.into()))?;
        Ok(Self(id))
    }
}

/// JSON body whose rejections use the service's error envelope.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                HttpError::from_error(ApplicationError::validation(rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}
