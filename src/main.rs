use fashionprompt::{
    logger, Config, DescribeRequest, FlowState, FormOrchestrator, GeminiClient, PromptForm,
};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(
        logger::LoggerConfig::development().with_level(logger::LogLevel::Debug),
    )?;

    log::info!("🔍 Checking Google AI environment...");

    let config = Config::from_env();
    let gemini_config = config.gemini.clone().unwrap_or_default();

    // Check the default credential (the value itself is never logged)
    if gemini_config.api_key.is_some() {
        log::info!("✅ Default API key found in environment");
    } else {
        log::warn!("⚠️  No default API key in environment variables");
        log::warn!("💡 Requests will fail unless a saved user key exists");
    }

    // The user's saved key wins over the process default.
    let user_key = config.key_store().and_then(|store| {
        let key = store.load();
        match &key {
            Some(_) => log::info!("🔑 Using the API key saved at {}", store.path().display()),
            None => log::info!("🔑 No saved user key, relying on the process default"),
        }
        key
    });

    log::info!("🔄 Creating Gemini client...");
    let client = match GeminiClient::new(gemini_config) {
        Ok(client) => {
            log::info!("✅ Gemini client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    let mut orchestrator = FormOrchestrator::new();

    // Test 1: validation failure, no network call is made
    log::info!("🧪 Testing form validation...");
    let invalid_form = PromptForm {
        product_description: "x".to_string(),
        style: "HologramModel".to_string(),
        model_ethnicity: "Local".to_string(),
        pose: "StandingPose".to_string(),
        photo_aspect: "Square".to_string(),
        additional_details: String::new(),
    };
    orchestrator
        .submit_prompt(&invalid_form, client.prompt(), user_key.as_deref())
        .await;
    for error in orchestrator.field_errors() {
        log::info!("📝 Field '{}': {}", error.field, error.message);
    }

    // Test 2: full prompt generation flow
    log::info!("🔄 Testing prompt generation...");
    let form = PromptForm {
        product_description: "White t-shirt with a graphic print".to_string(),
        style: "FemaleModel".to_string(),
        model_ethnicity: "Local".to_string(),
        pose: "StandingPose".to_string(),
        photo_aspect: "Square".to_string(),
        additional_details: "soft studio lighting, minimalist concrete background".to_string(),
    };

    match orchestrator
        .submit_prompt(&form, client.prompt(), user_key.as_deref())
        .await
    {
        FlowState::Success { output } => {
            log::info!("✅ Prompt generation successful!");
            log::info!("📝 Generated prompt: {}", output);
        }
        FlowState::Error { message } => {
            log::error!("❌ Prompt generation failed: {}", message);
        }
        other => log::warn!("⚠️  Unexpected flow state: {:?}", other),
    }
    orchestrator.acknowledge_prompt();

    // Test 3: image description, if a demo image is configured
    if let Ok(path) = env::var("FASHIONPROMPT_DEMO_IMAGE") {
        log::info!("🖼️  Testing image description with {}...", path);
        let bytes = fs::read(&path)?;
        let mime_type = if path.ends_with(".png") {
            "image/png"
        } else {
            "image/jpeg"
        };
        let request = DescribeRequest::from_bytes(mime_type, &bytes);

        match orchestrator
            .submit_describe(&request, client.describe(), user_key.as_deref())
            .await
        {
            FlowState::Success { output } => {
                log::info!("✅ Image description successful!");
                log::info!("📝 Description: {}", output);
            }
            FlowState::Error { message } => {
                log::error!("❌ Image description failed: {}", message);
            }
            other => log::warn!("⚠️  Unexpected flow state: {:?}", other),
        }
    } else {
        log::info!("🖼️  Set FASHIONPROMPT_DEMO_IMAGE to also test image description");
    }

    log::info!("🎉 All tests completed!");
    Ok(())
}
