use super::models::{SuggestionRequest, SuggestionResponse};
use super::prompt::{build_user_prompt, parse_json_from_response, SYSTEM_PROMPT};
use super::SuggestionService;
use crate::error::{optimizer_error, AppResult};
use async_trait::async_trait;
use rig::completion::{Chat, Message};
use rig::providers::gemini::Client as GeminiClient;
use tracing::{debug, info};

/// Suggestion service backed by Google Gemini through Rig
pub struct GeminiSuggestionService {
    client: GeminiClient,
    model: String,
}

impl GeminiSuggestionService {
    pub fn new(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            client: GeminiClient::new(api_key),
            model: model.into(),
        }
    }
}

#[async_trait]
impl SuggestionService for GeminiSuggestionService {
    async fn suggest(&self, request: &SuggestionRequest) -> AppResult<SuggestionResponse> {
        info!("Requesting pattern suggestion from Gemini model {}", self.model);

        let user_prompt = build_user_prompt(request)?;
        debug!("Suggestion prompt:\n{}", user_prompt);

        let agent = self
            .client
            .agent(&self.model)
            .preamble(SYSTEM_PROMPT)
            .temperature(0.2)
            .build();

        let response = agent
            .chat(user_prompt, Vec::<Message>::new())
            .await
            .map_err(|e| optimizer_error(&format!("Rig API request failed: {}", e)))?;

        info!("Received response from Gemini");
        parse_json_from_response(&response)
    }
}
