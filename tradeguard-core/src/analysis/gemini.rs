//! Gemini image analyzer.
//!
//! Posts one `generateContent` request (inline base64 image + fixed prompt)
//! and joins the text parts of the first candidate. One request per call: no
//! retry, no backoff. Failures come back as [`AnalysisError`] for the caller
//! to show.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{AnalysisError, ImageAnalyzer, ImageInput, ANALYSIS_PROMPT, EMPTY_ANALYSIS};
use crate::config::AnalyzerSettings;

// ── Request ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

// ── Response ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    status: Option<String>,
}

/// Gemini-backed [`ImageAnalyzer`].
pub struct GeminiAnalyzer {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
}

impl GeminiAnalyzer {
    pub fn new(settings: &AnalyzerSettings) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Network(format!("build HTTP client: {e}")))?;

        Ok(Self::with_client(client, settings))
    }

    /// Use a pre-built HTTP client (proxy or TLS settings of the caller's choosing).
    pub fn with_client(client: reqwest::blocking::Client, settings: &AnalyzerSettings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
        }
    }

    /// `{endpoint}/models/{model}:generateContent`
    pub fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    pub(crate) fn build_request(image: &ImageInput) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart {
                        inline_data: Some(InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.to_base64(),
                        }),
                        text: None,
                    },
                    RequestPart {
                        inline_data: None,
                        text: Some(ANALYSIS_PROMPT.to_string()),
                    },
                ],
            }],
        }
    }

    /// Join the text parts of the first candidate.
    pub(crate) fn extract_text(resp: GenerateContentResponse) -> String {
        let text: String = resp
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            EMPTY_ANALYSIS.to_string()
        } else {
            text
        }
    }

    /// Turn a non-success response body into an error message.
    pub(crate) fn api_error(status: u16, body: &str) -> AnalysisError {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(env) => match env.error.status {
                Some(code) => format!("{code}: {}", env.error.message),
                None => env.error.message,
            },
            Err(_) if body.trim().is_empty() => "unknown error".to_string(),
            Err(_) => body.trim().to_string(),
        };
        AnalysisError::Api { status, message }
    }
}

impl ImageAnalyzer for GeminiAnalyzer {
    fn name(&self) -> &str {
        "gemini"
    }

    fn analyze(&self, image: &ImageInput, api_key: &str) -> Result<String, AnalysisError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AnalysisError::MissingApiKey);
        }

        let url = self.request_url();
        let body = Self::build_request(image);
        tracing::info!(
            model = %self.model,
            mime = %image.mime_type,
            bytes = image.data.len(),
            "sending image for analysis"
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                tracing::warn!(error = %e, "analysis request failed");
                AnalysisError::Network(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            let err = Self::api_error(status.as_u16(), &text);
            tracing::warn!(status = status.as_u16(), error = %err, "analysis rejected");
            return Err(err);
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .map_err(|e| AnalysisError::ResponseFormat(e.to_string()))?;
        let text = Self::extract_text(parsed);
        tracing::info!(chars = text.len(), "analysis complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> ImageInput {
        ImageInput::new("image/png", vec![1, 2, 3]).unwrap()
    }

    #[test]
    fn request_shape() {
        let req = GeminiAnalyzer::build_request(&sample_image());
        let json = serde_json::to_value(&req).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "AQID");
        assert!(parts[0].get("text").is_none());
        assert_eq!(parts[1]["text"], ANALYSIS_PROMPT);
        assert!(parts[1].get("inlineData").is_none());
    }

    #[test]
    fn request_url_trims_trailing_slash() {
        let settings = AnalyzerSettings {
            endpoint: "http://localhost:8080/v1beta/".into(),
            ..AnalyzerSettings::default()
        };
        let analyzer = GeminiAnalyzer::new(&settings).unwrap();
        assert_eq!(
            analyzer.request_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn extract_joins_parts() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"1. Stop "},{"text":"at -5%"}],"role":"model"}}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiAnalyzer::extract_text(resp), "1. Stop at -5%");
    }

    #[test]
    fn extract_empty_falls_back() {
        let resp: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(GeminiAnalyzer::extract_text(resp), EMPTY_ANALYSIS);

        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(GeminiAnalyzer::extract_text(resp), EMPTY_ANALYSIS);
    }

    #[test]
    fn api_error_uses_envelope_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        match GeminiAnalyzer::api_error(400, body) {
            AnalysisError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "INVALID_ARGUMENT: API key not valid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_body() {
        match GeminiAnalyzer::api_error(502, "bad gateway") {
            AnalysisError::Api { message, .. } => assert_eq!(message, "bad gateway"),
            other => panic!("unexpected error: {other:?}"),
        }
        match GeminiAnalyzer::api_error(500, "") {
            AnalysisError::Api { message, .. } => assert_eq!(message, "unknown error"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_key_fails_before_io() {
        let settings = AnalyzerSettings {
            endpoint: "http://127.0.0.1:1".into(),
            ..AnalyzerSettings::default()
        };
        let analyzer = GeminiAnalyzer::new(&settings).unwrap();
        let err = analyzer.analyze(&sample_image(), "   ").unwrap_err();
        assert!(matches!(err, AnalysisError::MissingApiKey));
    }
}
