pub mod config;
pub mod credentials;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod store;
pub mod template;

pub use config::{Config, GeminiConfig};
pub use credentials::{resolve, CredentialSource, EffectiveCredential};
pub use error::{GenerationError, Result};
pub use gemini::{DescribeClient, DescribeGateway, GeminiClient, PromptClient, PromptGateway};
pub use models::{
    DescribeRequest, DescribeResult, FieldError, ModelEthnicity, PhotoAspect, Pose, PromptForm,
    PromptRequest, PromptResult, Style,
};
pub use orchestrator::{FlowState, FormOrchestrator};
pub use store::KeyStore;
pub use template::{render, KEYWORD_SUFFIX};
