use crate::config::GeminiConfig;
use crate::credentials;
use crate::error::Result;
use crate::gemini::{invoke_model, structured_output, PromptGateway, DEFAULT_MODEL};
use crate::models::{PromptRequest, PromptResult};
use crate::template;
use async_trait::async_trait;
use serde_json::json;

/// Generation Gateway: renders the prompt template and asks the text model
/// for a single `{ "prompt": string }` object. No retries, no caching; each
/// call is independent.
#[derive(Clone)]
pub struct PromptClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl PromptClient {
    pub(crate) fn new(http: reqwest::Client, config: GeminiConfig) -> Self {
        Self { http, config }
    }

    pub fn model_id(&self) -> &str {
        self.config.text_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

#[async_trait]
impl PromptGateway for PromptClient {
    async fn generate(
        &self,
        request: &PromptRequest,
        user_key: Option<&str>,
    ) -> Result<PromptResult> {
        let credential = credentials::resolve(user_key, self.config.api_key.as_deref())?;
        if credential.is_default() {
            log::warn!("No user API key supplied, falling back to the process default");
        }

        let rendered = template::render(request);
        log::debug!("Rendered prompt instruction: {}", rendered);

        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": rendered }]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "prompt": { "type": "STRING" }
                    },
                    "required": ["prompt"]
                }
            }
        });

        let response = invoke_model(&self.http, self.model_id(), &credential, &payload).await?;
        structured_output::<PromptResult>(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::models::PromptForm;

    fn client(config: GeminiConfig) -> PromptClient {
        PromptClient::new(reqwest::Client::new(), config)
    }

    #[test]
    fn model_id_defaults_to_the_fixed_identifier() {
        assert_eq!(client(GeminiConfig::new()).model_id(), "gemini-1.5-flash");
        let overridden = client(GeminiConfig::new().with_text_model("gemini-1.5-pro"));
        assert_eq!(overridden.model_id(), "gemini-1.5-pro");
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_network_io() {
        let client = client(GeminiConfig::new());
        let request = PromptForm {
            product_description: "White t-shirt".to_string(),
            style: "FemaleModel".to_string(),
            model_ethnicity: "Local".to_string(),
            pose: "StandingPose".to_string(),
            photo_aspect: "Square".to_string(),
            additional_details: String::new(),
        }
        .validate()
        .unwrap();

        let error = client.generate(&request, None).await.unwrap_err();
        assert!(matches!(error, GenerationError::MissingCredential));
    }
}
