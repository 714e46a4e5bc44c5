use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::error::{ImageAnalysisError, TransportError};

pub const DEFAULT_CHAT_URL: &str = "https://mini-project-n4ll.onrender.com/api/chat";
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: String,
}

#[derive(Deserialize)]
struct AnalysisResponse {
    analysis: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub reply_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAnalysis {
    pub analysis_text: String,
}

/// An image file queued for upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }
}

/// Outbound calls the chat session depends on.
///
/// Each call issues exactly one request. There is no retry, timeout or
/// cancellation at this layer; callers own failure handling.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<ChatReply, TransportError>;

    async fn analyze_image(&self, upload: ImageUpload) -> Result<ImageAnalysis, ImageAnalysisError>;
}

/// reqwest-backed transport talking to the chat proxy and the analysis endpoint
#[derive(Clone)]
pub struct EcoApiClient {
    client: Client,
    chat_url: String,
    analyze_url: String,
}

impl EcoApiClient {
    pub fn new(chat_url: &str, api_base: &str) -> Self {
        Self {
            client: Client::new(),
            chat_url: chat_url.to_string(),
            analyze_url: format!("{}/analyze-image", api_base.trim_end_matches('/')),
        }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }
}

impl Default for EcoApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_CHAT_URL, DEFAULT_API_BASE)
    }
}

/// Content-Type header of a response, if present and readable
fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.contains("application/json"))
}

#[async_trait]
impl ChatTransport for EcoApiClient {
    async fn send_message(&self, text: &str) -> Result<ChatReply, TransportError> {
        if text.trim().is_empty() {
            return Err(TransportError::EmptyMessage);
        }

        tracing::debug!("POST {} ({} chars)", self.chat_url, text.chars().count());

        let response = self
            .client
            .post(&self.chat_url)
            .header(ACCEPT, "application/json")
            .json(&ChatRequest { message: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let content_type = content_type(&response);
        if !is_json(content_type.as_deref()) {
            return Err(TransportError::NotJson { content_type });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body).map_err(TransportError::Parse)?;
        Ok(ChatReply {
            reply_text: parsed.message,
        })
    }

    async fn analyze_image(&self, upload: ImageUpload) -> Result<ImageAnalysis, ImageAnalysisError> {
        if upload.bytes.is_empty() {
            return Err(ImageAnalysisError::EmptyFile);
        }

        tracing::debug!(
            "POST {} ({}, {} bytes)",
            self.analyze_url,
            upload.mime_type,
            upload.bytes.len()
        );

        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)
            .map_err(|_| ImageAnalysisError::InvalidMimeType(upload.mime_type.clone()))?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(&self.analyze_url)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageAnalysisError::Status(status.as_u16()));
        }

        let content_type = content_type(&response);
        if !is_json(content_type.as_deref()) {
            return Err(ImageAnalysisError::NotJson { content_type });
        }

        let body = response.text().await?;
        let parsed: AnalysisResponse =
            serde_json::from_str(&body).map_err(ImageAnalysisError::Parse)?;
        Ok(ImageAnalysis {
            analysis_text: parsed.analysis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Multipart;
    use axum::http::{header, StatusCode};
    use axum::response::{Html, IntoResponse};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn echo_chat(Json(body): Json<Value>) -> Json<Value> {
        let text = body["message"].as_str().unwrap_or_default();
        Json(json!({ "message": format!("echo: {}", text) }))
    }

    async fn analyze(mut multipart: Multipart) -> impl IntoResponse {
        while let Some(field) = multipart.next_field().await.unwrap() {
            if field.name() == Some("image") {
                let mime = field.content_type().unwrap_or_default().to_string();
                let name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.unwrap();
                return Json(json!({
                    "analysis": format!("{} {} {}", name, mime, bytes.len())
                }))
                .into_response();
            }
        }
        StatusCode::BAD_REQUEST.into_response()
    }

    /// Serve a router on an ephemeral port, returning its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn test_server() -> String {
        let router = Router::new()
            .route("/chat", post(echo_chat))
            .route("/broken", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/html", post(|| async { Html("<p>maintenance</p>") }))
            .route(
                "/wrong-shape",
                post(|| async { ([(header::CONTENT_TYPE, "application/json")], "{\"reply\":1}") }),
            )
            .route("/api/analyze-image", post(analyze))
            .route(
                "/down/analyze-image",
                post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
            )
            .route(
                "/text/analyze-image",
                post(|| async { "not json at all" }),
            );
        serve(router).await
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let base = test_server().await;
        let client = EcoApiClient::new(&format!("{}/chat", base), &format!("{}/api", base));
        let reply = client.send_message("How do I recycle plastic?").await.unwrap();
        assert_eq!(reply.reply_text, "echo: How do I recycle plastic?");
    }

    #[tokio::test]
    async fn test_send_message_status_error() {
        let base = test_server().await;
        let client = EcoApiClient::new(&format!("{}/broken", base), &base);
        let err = client.send_message("hello").await.unwrap_err();
        assert!(matches!(err, TransportError::Status(500)));
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_send_message_not_json() {
        let base = test_server().await;
        let client = EcoApiClient::new(&format!("{}/html", base), &base);
        let err = client.send_message("hello").await.unwrap_err();
        match err {
            TransportError::NotJson { content_type } => {
                assert!(content_type.unwrap().starts_with("text/html"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_message_wrong_shape() {
        let base = test_server().await;
        let client = EcoApiClient::new(&format!("{}/wrong-shape", base), &base);
        let err = client.send_message("hello").await.unwrap_err();
        assert!(matches!(err, TransportError::Parse(_)));
    }

    #[tokio::test]
    async fn test_send_empty_message_fails_without_request() {
        // Nothing listens here; reaching the network would be a Network error
        let client = EcoApiClient::new("http://127.0.0.1:9/chat", "http://127.0.0.1:9/api");
        let err = client.send_message("   ").await.unwrap_err();
        assert!(matches!(err, TransportError::EmptyMessage));
    }

    #[tokio::test]
    async fn test_send_message_network_error() {
        let client = EcoApiClient::new("http://127.0.0.1:9/chat", "http://127.0.0.1:9/api");
        let err = client.send_message("hello").await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn test_analyze_image_uploads_multipart() {
        let base = test_server().await;
        let client = EcoApiClient::new(&format!("{}/chat", base), &format!("{}/api/", base));
        let upload = ImageUpload::new(vec![1, 2, 3, 4], "image/png", "bottle.png");
        let analysis = client.analyze_image(upload).await.unwrap();
        assert_eq!(analysis.analysis_text, "bottle.png image/png 4");
    }

    #[tokio::test]
    async fn test_analyze_image_failures() {
        let base = test_server().await;
        let upload = ImageUpload::new(vec![1], "image/jpeg", "can.jpg");

        let down = EcoApiClient::new(&base, &format!("{}/down", base));
        let err = down.analyze_image(upload.clone()).await.unwrap_err();
        assert!(matches!(err, ImageAnalysisError::Status(503)));

        let text = EcoApiClient::new(&base, &format!("{}/text", base));
        let err = text.analyze_image(upload).await.unwrap_err();
        assert!(matches!(err, ImageAnalysisError::NotJson { .. }));
    }

    #[tokio::test]
    async fn test_analyze_image_rejects_bad_input() {
        let client = EcoApiClient::default();
        let err = client
            .analyze_image(ImageUpload::new(Vec::new(), "image/png", "empty.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImageAnalysisError::EmptyFile));

        let err = client
            .analyze_image(ImageUpload::new(vec![1], "not a mime", "x.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImageAnalysisError::InvalidMimeType(_)));
    }

    #[test]
    fn test_analyze_url_joins_base() {
        let client = EcoApiClient::new("http://x/chat", "http://localhost:3000/api/");
        assert_eq!(client.analyze_url(), "http://localhost:3000/api/analyze-image");
    }
}
