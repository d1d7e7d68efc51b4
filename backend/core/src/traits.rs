use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for hosted vision models: one prompt plus one image in, free text out.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Provider name (e.g., "vertex", "gemini").
    fn name(&self) -> &str;

    /// Model identifier sent to the provider.
    fn model(&self) -> &str;

    /// Send a generation request and return the reply text.
    async fn generate(&self, request: &VisionRequest) -> Result<VisionResponse>;
}

/// Sampling parameters sent with every vision request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 1024,
            temperature: 0.1,
            top_p: 1.0,
            top_k: 32,
        }
    }
}

/// Request to a vision model.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub prompt: String,
    pub image: Vec<u8>,
    pub mime_type: String,
    pub generation: GenerationConfig,
}

/// Response from a vision model.
#[derive(Debug, Clone)]
pub struct VisionResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}
