use serde::Serialize;

/// Body of a text-generation request to the serverless inference API.
#[derive(Serialize, Debug, Clone)]
pub struct TextGenerationRequest {
    pub inputs: String,
    pub parameters: TextGenerationParameters,
}

#[derive(Serialize, Debug, Clone)]
pub struct TextGenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    /// Whether the prompt is echoed back in front of the generated text.
    pub return_full_text: bool,
}
