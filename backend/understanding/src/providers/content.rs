//! Wire types for the `generateContent` API shared by Vertex AI and the
//! Gemini developer API.

use anyhow::{Result, bail};
use base64::{Engine, engine::general_purpose::STANDARD};
use freshlens_core::{GenerationConfig, VisionRequest};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentRequest {
    /// One user turn: the prompt text followed by the base64 image.
    pub fn from_vision(request: &VisionRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part {
                        text: Some(request.prompt.clone()),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: request.mime_type.clone(),
                            data: STANDARD.encode(&request.image),
                        }),
                    },
                ],
            }],
            generation_config: request.generation,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    ///
    /// A blocked prompt or a candidate without text is a malformed reply.
    pub fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            bail!("prompt blocked: {reason}");
        }
        let Some(candidate) = self.candidates.into_iter().next() else {
            bail!("response contained no candidates");
        };
        let finish_reason = candidate.finish_reason.unwrap_or_default();
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.is_empty() {
            bail!("response contained no text (finish reason: {finish_reason})");
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> VisionRequest {
        VisionRequest {
            prompt: "describe".into(),
            image: vec![0x89, b'P', b'N', b'G'],
            mime_type: "image/png".into(),
            generation: GenerationConfig::default(),
        }
    }

    #[test]
    fn request_body_matches_api_shape() {
        let body = serde_json::to_value(GenerateContentRequest::from_vision(&request())).unwrap();
        let parts = &body["contents"][0]["parts"];
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(parts[0]["text"], "describe");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "iVBORw==");
        assert!(parts[0].get("inlineData").is_none());

        let config = &body["generationConfig"];
        assert_eq!(config["maxOutputTokens"], 1024);
        assert_eq!(config["topK"], 32);
        assert_eq!(config["topP"], 1.0);
        assert!((config["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let json = serde_json::json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "Produce: Fig\n" }, { "text": "Freshness Score: 6" }] },
                  "finishReason": "STOP" },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        let resp: GenerateContentResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.into_text().unwrap(), "Produce: Fig\nFreshness Score: 6");
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let resp: GenerateContentResponse = serde_json::from_value(json).unwrap();
        assert!(resp.into_text().unwrap_err().to_string().contains("SAFETY"));
    }

    #[test]
    fn candidate_without_text_is_an_error() {
        let json = serde_json::json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] });
        let resp: GenerateContentResponse = serde_json::from_value(json).unwrap();
        assert!(resp.into_text().unwrap_err().to_string().contains("MAX_TOKENS"));
    }
}
