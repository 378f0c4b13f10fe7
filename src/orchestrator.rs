use crate::design::model::{fallback_design, Design};
use crate::design::{normalizer, validator};
use crate::llm::gemini::GeminiClient;

/// Turns one free-text instruction into a design.
///
/// Never fails: transport and model errors are logged and answered with the
/// fallback design.
pub struct DesignService {
    client: GeminiClient,
}

impl DesignService {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    pub async fn handle_request(&self, instruction: &str) -> Design {
        log::debug!("design request ({} chars)", instruction.chars().count());

        let text = match self.client.request_design(instruction).await {
            Ok(text) => text,
            Err(err) => {
                log::error!("model request failed: {err}");
                return fallback_design();
            }
        };

        let design = normalizer::normalize(Some(text.as_str()));

        let report = validator::inspect(&design);
        if !report.is_clean() {
            for finding in &report.findings {
                log::warn!("{finding}");
            }
        }
        log::debug!("design ready: {} shapes [{}]", design.len(), report.summary());

        design
    }
}
