use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use freshlens_core::{VisionModel, VisionRequest, VisionResponse};

use super::auth::VertexAuth;
use super::content::{GenerateContentRequest, GenerateContentResponse};

/// Vertex AI `generateContent` on a Google publisher model.
pub struct VertexProvider {
    client: Client,
    project: String,
    location: String,
    model: String,
    auth: VertexAuth,
    base_url: String,
}

impl VertexProvider {
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        model: impl Into<String>,
        auth: VertexAuth,
    ) -> Self {
        let location = location.into();
        Self {
            client: Client::new(),
            base_url: format!("https://{location}-aiplatform.googleapis.com/v1"),
            project: project.into(),
            location,
            model: model.into(),
            auth,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.project,
            self.location,
            self.model
        )
    }
}

#[async_trait]
impl VisionModel for VertexProvider {
    fn name(&self) -> &str {
        "vertex"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &VisionRequest) -> Result<VisionResponse> {
        let start = Instant::now();
        let body = GenerateContentRequest::from_vision(request);

        info!(model = %self.model, image_bytes = request.image.len(), "Describing image via Vertex AI");

        let token = self.auth.bearer_token().await?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .context("Vertex AI HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Vertex AI returned {}: {}", status, error_body);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Vertex AI response")?;
        let text = parsed.into_text()?;

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(latency_ms, chars = text.len(), "Vertex AI reply received");

        Ok(VisionResponse {
            text,
            provider: "vertex".to_string(),
            model: self.model.clone(),
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> VertexAuth {
        VertexAuth::AccessToken("tok".into())
    }

    #[test]
    fn endpoint_uses_regional_host() {
        let p = VertexProvider::new("orchard", "europe-west4", "gemini-1.5-flash-002", token());
        assert_eq!(
            p.endpoint(),
            "https://europe-west4-aiplatform.googleapis.com/v1/projects/orchard/locations/europe-west4/publishers/google/models/gemini-1.5-flash-002:generateContent"
        );
    }

    #[test]
    fn base_url_override() {
        let p = VertexProvider::new("p", "us-central1", "m", token()).with_base_url("http://127.0.0.1:9/v1/");
        assert_eq!(
            p.endpoint(),
            "http://127.0.0.1:9/v1/projects/p/locations/us-central1/publishers/google/models/m:generateContent"
        );
    }
}
