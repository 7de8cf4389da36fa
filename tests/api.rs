use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use med_rag::api::{create_router, AppState};
use med_rag::providers::CompletionProvider;
use med_rag::rag::{RagChain, RetrievedChunk, Retriever};

struct FakeRetriever {
    fail: bool,
}

#[async_trait]
impl Retriever for FakeRetriever {
    async fn retrieve(&self, _query: &str, top_k: u64) -> Result<Vec<RetrievedChunk>> {
        if self.fail {
            return Err(anyhow!("vector database unreachable"));
        }
        Ok((0..top_k)
            .map(|i| RetrievedChunk {
                text: format!("Relevant passage {}", i),
                source: "data/medical_book.pdf".to_string(),
                score: 0.9,
            })
            .collect())
    }
}

struct FakeLlm {
    fail: bool,
}

#[async_trait]
impl CompletionProvider for FakeLlm {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if self.fail {
            return Err(anyhow!("model unreachable"));
        }
        assert!(prompt.contains("Relevant passage"));
        Ok("A fever is an elevated body temperature.".to_string())
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}

fn test_router(retriever_fails: bool, llm_fails: bool) -> axum::Router {
    let chain = RagChain::new(
        Arc::new(FakeRetriever {
            fail: retriever_fails,
        }),
        Arc::new(FakeLlm { fail: llm_fails }),
        3,
    );
    create_router(AppState {
        chain: Arc::new(chain),
    })
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/get")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_chat_returns_answer() {
    let app = test_router(false, false);
    let response = app.oneshot(form_request("msg=What+is+a+fever%3F")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(!body.is_empty());
    assert_eq!(body, "A fever is an elevated body temperature.");
}

#[tokio::test]
async fn test_retrieval_failure_is_bad_gateway_with_generic_body() {
    let app = test_router(true, false);
    let response = app.oneshot(form_request("msg=hello")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_string(response).await, "Error occurred");
}

#[tokio::test]
async fn test_llm_failure_is_bad_gateway_with_generic_body() {
    let app = test_router(false, true);
    let response = app.oneshot(form_request("msg=hello")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_string(response).await, "Error occurred");
}

#[tokio::test]
async fn test_missing_msg_field_is_bad_request() {
    let app = test_router(false, false);
    let response = app.oneshot(form_request("other=value")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_msg_is_bad_request() {
    let app = test_router(false, false);
    let response = app.oneshot(form_request("msg=+++")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_home_page_ignores_backend_health() {
    // Both backends failing; the home route performs no backend call
    let app = test_router(true, true);
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Medical Chatbot"));
}
