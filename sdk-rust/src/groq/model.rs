use super::api::{
    ChatCompletionRequestMessage, CompletionUsage, CreateChatCompletionRequest,
    CreateChatCompletionResponse,
};
use crate::{
    client_utils, ExtractionProfile, LanguageModel, LanguageModelError, LanguageModelInput,
    LanguageModelResult, ModelResponse, ModelUsage, PromptFormat,
};
use reqwest::Client;

const PROVIDER: &str = "groq";
pub const DEFAULT_MODEL_ID: &str = "mixtral-8x7b-32768";
const DEFAULT_TEMPERATURE: f64 = 0.8;
const DEFAULT_MAX_TOKENS: u32 = 2500;

/// Chat completion adapter for the Groq OpenAI-compatible endpoint.
pub struct GroqModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Clone, Default)]
pub struct GroqModelOptions {
    pub base_url: Option<String>,
    pub api_key: String,
    pub client: Option<Client>,
}

impl GroqModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: GroqModelOptions) -> Self {
        let GroqModelOptions {
            base_url,
            api_key,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string())
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
impl LanguageModel for GroqModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    fn label(&self) -> String {
        "Groq (Mixtral-8x7b)".to_string()
    }

    fn prompt_format(&self) -> PromptFormat {
        PromptFormat::Chat
    }

    fn extraction_profile(&self) -> ExtractionProfile {
        ExtractionProfile::Strict
    }

    async fn generate(&self, input: LanguageModelInput) -> LanguageModelResult<ModelResponse> {
        crate::opentelemetry::trace_generate(
            self.provider(),
            &self.model_id(),
            input,
            |input| async move {
                let request = convert_to_chat_request(input, &self.model_id);
                let headers = client_utils::bearer_headers(PROVIDER, &self.api_key)?;

                let response: CreateChatCompletionResponse = client_utils::send_json(
                    &self.client,
                    &format!("{}/chat/completions", self.base_url),
                    &request,
                    headers,
                )
                .await?;

                map_chat_response(response)
            },
        )
        .await
    }
}

fn convert_to_chat_request(input: LanguageModelInput, model_id: &str) -> CreateChatCompletionRequest {
    let LanguageModelInput {
        system_prompt,
        prompt,
        max_tokens,
        temperature,
        top_p,
    } = input;

    let mut messages = Vec::with_capacity(2);
    if let Some(system_prompt) = system_prompt {
        messages.push(ChatCompletionRequestMessage::System {
            content: system_prompt,
        });
    }
    messages.push(ChatCompletionRequestMessage::User { content: prompt });

    CreateChatCompletionRequest {
        model: model_id.to_string(),
        messages,
        temperature: Some(temperature.unwrap_or(DEFAULT_TEMPERATURE)),
        max_tokens: Some(max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)),
        top_p,
    }
}

fn map_chat_response(response: CreateChatCompletionResponse) -> LanguageModelResult<ModelResponse> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        LanguageModelError::Invariant(PROVIDER, "No choices in response".to_string())
    })?;

    Ok(ModelResponse {
        // A choice without content is a legitimate (if useless) completion.
        text: choice.message.content.unwrap_or_default(),
        usage: response.usage.map(map_usage),
    })
}

fn map_usage(usage: CompletionUsage) -> ModelUsage {
    ModelUsage {
        input_tokens: usage.prompt_tokens,
        output_tokens: usage.completion_tokens,
    }
}
