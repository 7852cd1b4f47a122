use crate::config::GeminiConfig;
use crate::credentials;
use crate::error::Result;
use crate::gemini::{invoke_model, structured_output, DescribeGateway, DEFAULT_MODEL};
use crate::models::{DescribeRequest, DescribeResult};
use async_trait::async_trait;
use serde_json::json;

/// Fixed instruction sent alongside the image. Not user-controlled.
const DESCRIBE_INSTRUCTION: &str = "You are an expert in fashion e-commerce. \
    Describe this product photo concisely for a product listing, focusing on \
    the product itself.";

/// Image Description Gateway: sends the uploaded photo as `inlineData` with a
/// fixed instruction and asks for a single `{ "description": string }`
/// object. The data URI is validated locally before anything goes on the
/// wire.
#[derive(Clone)]
pub struct DescribeClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl DescribeClient {
    pub(crate) fn new(http: reqwest::Client, config: GeminiConfig) -> Self {
        Self { http, config }
    }

    pub fn model_id(&self) -> &str {
        self.config.vision_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

#[async_trait]
impl DescribeGateway for DescribeClient {
    async fn describe(
        &self,
        request: &DescribeRequest,
        user_key: Option<&str>,
    ) -> Result<DescribeResult> {
        let image = request.image_payload()?;
        let credential = credentials::resolve(user_key, self.config.api_key.as_deref())?;
        if credential.is_default() {
            log::warn!("No user API key supplied, falling back to the process default");
        }

        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": DESCRIBE_INSTRUCTION },
                    {
                        "inlineData": {
                            "mimeType": image.mime_type,
                            "data": image.data
                        }
                    }
                ]
            }],
            "generationConfig": {
                "temperature": 0.2,
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "description": { "type": "STRING" }
                    },
                    "required": ["description"]
                }
            }
        });

        let response = invoke_model(&self.http, self.model_id(), &credential, &payload).await?;
        structured_output::<DescribeResult>(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;

    fn client(config: GeminiConfig) -> DescribeClient {
        DescribeClient::new(reqwest::Client::new(), config)
    }

    #[tokio::test]
    async fn malformed_data_uri_fails_locally() {
        // A key is configured, so the only way this fails is the local check.
        let client = client(GeminiConfig::new().with_api_key("test-key"));
        let request = DescribeRequest::new("image/png;base64,aGVsbG8=");
        let error = client.describe(&request, None).await.unwrap_err();
        assert!(matches!(error, GenerationError::InvalidImageFormat(_)));
    }

    #[test]
    fn vision_model_falls_back_to_the_fixed_identifier() {
        assert_eq!(client(GeminiConfig::new()).model_id(), "gemini-1.5-flash");
    }
}
