//! Uniform JSON envelope and error mapping for every endpoint.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::value_objects::{IdError, ProductId, UserId};
use crate::CatalogError;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }
}

/// Serialises `data` into a success envelope. Handlers call this while the
/// borrowed catalog data is still alive.
pub fn ok<T: Serialize>(data: T) -> Response {
    Json(ApiResponse::success(data)).into_response()
}

pub type ApiResult = Result<Response, ApiError>;

/// Raw query-string pairs in request order, repeated keys included.
pub type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Catalog(CatalogError::ProductNotFound) => StatusCode::NOT_FOUND,
            Self::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
            self.to_string()
        };
        let body: ApiResponse<()> = ApiResponse { success: false, data: None, error: Some(message) };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("invalid query string: {}", rejection.body_text()))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().into_keys().collect();
        fields.sort_unstable();
        Self::BadRequest(format!("missing or invalid fields: {}", fields.join(", ")))
    }
}

/// A product id as clients send it: a JSON string or a bare number.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum IdParam {
    Text(String),
    Number(u64),
}

impl Default for IdParam {
    fn default() -> Self { Self::Text(String::new()) }
}

impl IdParam {
    pub fn product_id(&self) -> Result<ProductId, ApiError> {
        let raw = match self {
            Self::Text(text) => text.clone(),
            Self::Number(n) => n.to_string(),
        };
        product_id(raw)
    }
}

pub fn product_id(raw: impl Into<String>) -> Result<ProductId, ApiError> {
    ProductId::new(raw).map_err(|e| id_error("productId", e))
}

pub fn user_id(field: &str, raw: impl Into<String>) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(|e| id_error(field, e))
}

fn id_error(field: &str, error: IdError) -> ApiError {
    ApiError::BadRequest(format!("{field}: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(CatalogError::ProductNotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(CatalogError::Storage("disk".into())).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": [1, 2] }));
    }

    #[test]
    fn test_id_param_accepts_numbers() {
        let id: IdParam = serde_json::from_str("7").unwrap();
        assert_eq!(id.product_id().unwrap().as_str(), "7");
        let id: IdParam = serde_json::from_str("\" 12 \"").unwrap();
        assert_eq!(id.product_id().unwrap().as_str(), "12");
        assert!(IdParam::default().product_id().is_err());
    }
}
