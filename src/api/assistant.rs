//! `POST /api/assistant`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::response::{ok, ApiResult};
use super::AppState;
use crate::assistant::reply;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AskRequest {
    #[validate(length(min = 1, max = 500))]
    pub message: String,
}

pub async fn ask(State(state): State<AppState>, body: Result<Json<AskRequest>, JsonRejection>) -> ApiResult {
    let Json(mut body) = body?;
    body.message = body.message.trim().to_string();
    body.validate()?;

    let reply = reply(&state.catalog, &body.message);
    info!(matched = reply.products.len(), "assistant replied");
    Ok(ok(reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{read_json, state};
    use crate::assistant::FALLBACK_TEXT;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn ask_body(message: &str) -> Result<Json<AskRequest>, JsonRejection> {
        Ok(Json(AskRequest { message: message.into() }))
    }

    #[tokio::test]
    async fn test_matches_keywords() {
        let response = ask(State(state()), ask_body("I need TOEIC practice")).await.unwrap();
        let (_, json) = read_json(response).await;
        assert!(json["data"]["products"].as_array().unwrap().iter().any(|p| p["id"] == "17"));
    }

    #[tokio::test]
    async fn test_fallback_text() {
        let response = ask(State(state()), ask_body("cooking class")).await.unwrap();
        let (_, json) = read_json(response).await;
        assert_eq!(json["data"]["text"], FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let err = ask(State(state()), ask_body("   ")).await.unwrap_err();
        let (status, json) = read_json(err.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "missing or invalid fields: message");
    }
}
