use super::api::{TextGenerationParameters, TextGenerationRequest};
use crate::{
    client_utils, ExtractionProfile, LanguageModel, LanguageModelError, LanguageModelInput,
    LanguageModelResult, ModelResponse, PromptFormat,
};
use reqwest::Client;
use serde_json::Value;

const PROVIDER: &str = "huggingface";
pub const DEFAULT_MODEL_ID: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
const DEFAULT_TEMPERATURE: f64 = 0.8;
const DEFAULT_MAX_NEW_TOKENS: u32 = 2000;
const DEFAULT_TOP_P: f64 = 0.95;

/// Raw completion adapter for the Hugging Face inference API.
pub struct HuggingFaceModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Clone, Default)]
pub struct HuggingFaceModelOptions {
    pub base_url: Option<String>,
    pub api_key: String,
    pub client: Option<Client>,
}

impl HuggingFaceModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: HuggingFaceModelOptions) -> Self {
        let HuggingFaceModelOptions {
            base_url,
            api_key,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://api-inference.huggingface.co".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);

        Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client,
        }
    }
}

#[async_trait::async_trait]
impl LanguageModel for HuggingFaceModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    fn label(&self) -> String {
        "Hugging Face (Mixtral)".to_string()
    }

    fn prompt_format(&self) -> PromptFormat {
        PromptFormat::Instruct
    }

    fn extraction_profile(&self) -> ExtractionProfile {
        ExtractionProfile::Anchored
    }

    async fn generate(&self, input: LanguageModelInput) -> LanguageModelResult<ModelResponse> {
        crate::opentelemetry::trace_generate(
            self.provider(),
            &self.model_id(),
            input,
            |input| async move {
                let request = convert_to_text_generation_request(input);
                let headers = client_utils::bearer_headers(PROVIDER, &self.api_key)?;

                let response: Value = client_utils::send_json(
                    &self.client,
                    &format!("{}/models/{}", self.base_url, self.model_id),
                    &request,
                    headers,
                )
                .await?;

                Ok(ModelResponse::text(extract_generated_text(response)?))
            },
        )
        .await
    }
}

/// The inference API has no system role; the framed prompt already carries
/// every instruction, so `system_prompt` is not forwarded.
fn convert_to_text_generation_request(input: LanguageModelInput) -> TextGenerationRequest {
    TextGenerationRequest {
        inputs: input.prompt,
        parameters: TextGenerationParameters {
            max_new_tokens: input.max_tokens.unwrap_or(DEFAULT_MAX_NEW_TOKENS),
            temperature: input.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: input.top_p.unwrap_or(DEFAULT_TOP_P),
            return_full_text: false,
        },
    }
}

/// Accepts either `[{"generated_text": ..}]` or `{"generated_text": ..}`.
fn extract_generated_text(response: Value) -> LanguageModelResult<String> {
    let generated = match response {
        Value::Array(items) => items
            .into_iter()
            .next()
            .and_then(|item| item.get("generated_text").cloned()),
        Value::Object(mut object) => object.remove("generated_text"),
        _ => None,
    };

    match generated {
        Some(Value::String(text)) if !text.is_empty() => Ok(text),
        _ => Err(LanguageModelError::Invariant(
            PROVIDER,
            "Unexpected response format from Hugging Face".to_string(),
        )),
    }
}
