use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::rag::{RagChain, RagError};

/// Clients never see internal error detail; this is the whole body for
/// upstream and internal failures.
const GENERIC_ERROR_BODY: &str = "Error occurred";

#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<RagChain>,
}

#[derive(Deserialize)]
pub struct ChatForm {
    pub msg: Option<String>,
}

/// Request-time error taxonomy. Full detail is logged; the response body
/// stays generic for anything past validation.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Upstream(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Upstream(_) => {
                (StatusCode::BAD_GATEWAY, GENERIC_ERROR_BODY).into_response()
            }
            ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_BODY).into_response()
            }
        }
    }
}

impl From<RagError> for ApiError {
    fn from(e: RagError) -> Self {
        match e {
            RagError::Retrieval(_) | RagError::Generation(_) => ApiError::Upstream(e.to_string()),
        }
    }
}

/// Create and configure the router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home_handler))
        .route("/get", post(chat_handler))
        .layer(cors)
        .with_state(state)
}

/// Static chat page. No backend call is made here.
async fn home_handler() -> Html<&'static str> {
    Html(include_str!("../../templates/chatbot.html"))
}

async fn chat_handler(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<String, ApiError> {
    let msg = form.msg.as_deref().map(str::trim).unwrap_or("");
    if msg.is_empty() {
        return Err(ApiError::Validation("msg field is required".to_string()));
    }

    log::info!("Input = {}", msg);

    let answer = state.chain.answer(msg).await.map_err(|e| {
        log::error!("Chat request failed: {}", e);
        ApiError::from(e)
    })?;

    log::info!("Response: {}", answer);
    Ok(answer)
}
