use postdraft_sdk::{LanguageModelError, ProviderId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// A required input was missing or blank.
    #[error("{0}")]
    Validation(String),
    /// No provider credential is configured. `setup` tells the operator where
    /// to obtain one.
    #[error("No API key configured. Please add GROQ_API_KEY or HUGGINGFACE_API_KEY to .env file.")]
    NoProviderAvailable { setup: String },
    /// The selected provider failed. Never retried.
    #[error("Language model error: {0}")]
    Provider(#[from] LanguageModelError),
}

impl GenerateError {
    pub(crate) fn no_provider_available() -> Self {
        let setup = ProviderId::DEFAULT_PRIORITY
            .iter()
            .map(|provider| format!("{} from {}", provider.env_var(), provider.setup_url()))
            .collect::<Vec<_>>()
            .join(" or ");

        Self::NoProviderAvailable {
            setup: format!("Get {setup}"),
        }
    }

    /// Whether the caller, rather than the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
