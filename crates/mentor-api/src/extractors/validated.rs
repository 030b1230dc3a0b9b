//! Validated JSON extractor
//!
//! Extracts and validates JSON request bodies using the validator crate.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// Validated JSON extractor
///
/// Extracts a JSON body and validates it using the `validator` crate.
/// The inner type must implement both `Deserialize` and `Validate`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| match e {
            JsonRejection::JsonDataError(e) => ApiError::invalid_body(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => ApiError::invalid_body(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => ApiError::invalid_body(e.body_text()),
            JsonRejection::BytesRejection(e) => ApiError::invalid_body(e.body_text()),
            _ => ApiError::invalid_body("Invalid JSON body"),
        })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Optional validated JSON extractor
///
/// Like [`ValidatedJson`] but yields `None` for an empty body.
#[derive(Debug, Clone)]
pub struct OptionalValidatedJson<T>(pub Option<T>);

impl<T: Default> OptionalValidatedJson<T> {
    /// The body, or the type's default when none was sent
    pub fn into_inner_or_default(self) -> T {
        self.0.unwrap_or_default()
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for OptionalValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let has_body = req
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<usize>().ok())
            .is_some_and(|len| len > 0);

        if !has_body {
            return Ok(OptionalValidatedJson(None));
        }

        let ValidatedJson(value) = ValidatedJson::from_request(req, state).await?;
        Ok(OptionalValidatedJson(Some(value)))
    }
}
