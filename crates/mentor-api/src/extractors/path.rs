//! Path parameter extractors
//!
//! Type-safe extraction of UUID identifiers from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use crate::response::ApiError;

/// Extract path parameters, reporting malformed IDs as 400
#[derive(Debug, Clone)]
pub struct IdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(IdPath(inner))
    }
}

/// Path parameters with mentor_id and service_id
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MentorServicePath {
    pub mentor_id: Uuid,
    pub service_id: Uuid,
}

/// Path parameters with mentor_id and slot_id
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MentorSlotPath {
    pub mentor_id: Uuid,
    pub slot_id: Uuid,
}
