use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use freshlens_core::{VisionModel, VisionRequest, VisionResponse};

/// A vision model that returns a canned reply, or fails, without any I/O.
pub struct MockVisionModel {
    reply: Option<String>,
    failure: Option<String>,
    requests: Mutex<Vec<VisionRequest>>,
}

impl MockVisionModel {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: None,
            failure: Some(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<VisionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl VisionModel for MockVisionModel {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &VisionRequest) -> Result<VisionResponse> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(VisionResponse {
            text: self.reply.clone().unwrap_or_default(),
            provider: "mock".to_string(),
            model: "mock".to_string(),
            latency_ms: 0,
        })
    }
}
