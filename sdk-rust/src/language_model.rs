use crate::{
    ExtractionProfile, LanguageModelInput, LanguageModelResult, ModelResponse, PromptFormat,
};

/// A remote text generation endpoint. Each provider normalizes its own
/// response envelope into a single [`ModelResponse`].
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    /// Human readable name of the provider and model, e.g. `Groq (Mixtral-8x7b)`.
    fn label(&self) -> String;
    fn prompt_format(&self) -> PromptFormat;
    fn extraction_profile(&self) -> ExtractionProfile;
    async fn generate(&self, input: LanguageModelInput) -> LanguageModelResult<ModelResponse>;
}
