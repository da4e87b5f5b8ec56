//! Custom Axum extractors
//!
//! Both reject with `ApiError` so clients get the JSON error body instead
//! of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use gallery_core::Painting;

use super::error::ApiError;

/// Extract a year from the path and parse it as an integer
pub struct Year(pub i32);

impl<S> FromRequestParts<S> for Year
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::validation("year", "missing path segment"))?;

        let year = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ApiError::validation("year", format!("'{}' is not an integer", raw)))?;

        Ok(Self(year))
    }
}

/// Extract a painting from a JSON request body
pub struct PaintingBody(pub Painting);

impl<S> FromRequest<S> for PaintingBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(painting) = Json::<Painting>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation("body", rejection.body_text()))?;

        Ok(Self(painting))
    }
}
