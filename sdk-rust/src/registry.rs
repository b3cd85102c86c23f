use crate::{
    groq::{self, GroqModel, GroqModelOptions},
    huggingface::{self, HuggingFaceModel, HuggingFaceModelOptions},
    LanguageModel,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};

/// The closed set of providers the registry knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Groq,
    HuggingFace,
}

impl ProviderId {
    /// Priority used when configuration does not declare one.
    pub const DEFAULT_PRIORITY: [Self; 2] = [Self::Groq, Self::HuggingFace];

    pub fn env_var(self) -> &'static str {
        match self {
            Self::Groq => "GROQ_API_KEY",
            Self::HuggingFace => "HUGGINGFACE_API_KEY",
        }
    }

    /// The value shipped in the sample `.env` file.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Groq => "your_groq_api_key_here",
            Self::HuggingFace => "your_huggingface_token_here",
        }
    }

    pub fn setup_url(self) -> &'static str {
        match self {
            Self::Groq => "https://console.groq.com/keys",
            Self::HuggingFace => "https://huggingface.co/settings/tokens",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Groq => f.write_str("groq"),
            Self::HuggingFace => f.write_str("huggingface"),
        }
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "huggingface" | "hugging_face" | "hf" => Ok(Self::HuggingFace),
            other => Err(format!("Unknown provider: {other}")),
        }
    }
}

/// A credential counts as configured only if it is present, non-blank and not
/// the documented placeholder.
pub fn is_configured(value: Option<&str>, placeholder: &str) -> bool {
    value.is_some_and(|value| {
        let value = value.trim();
        !value.is_empty() && value != placeholder
    })
}

#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub groq_api_key: Option<String>,
    pub huggingface_api_key: Option<String>,
}

impl ProviderCredentials {
    pub fn get(&self, provider: ProviderId) -> Option<&str> {
        match provider {
            ProviderId::Groq => self.groq_api_key.as_deref(),
            ProviderId::HuggingFace => self.huggingface_api_key.as_deref(),
        }
    }

    pub fn is_configured(&self, provider: ProviderId) -> bool {
        is_configured(self.get(provider), provider.placeholder())
    }
}

pub struct LanguageModelRegistryOptions {
    pub credentials: ProviderCredentials,
    /// Providers in the order they should be preferred. Duplicates are ignored.
    pub priority: Vec<ProviderId>,
    pub client: Option<Client>,
}

/// Holds the credential-gated adapters in priority order and selects exactly
/// one per request.
pub struct LanguageModelRegistry {
    language_models: Vec<Arc<dyn LanguageModel>>,
}

impl LanguageModelRegistry {
    pub fn new(options: LanguageModelRegistryOptions) -> Self {
        let LanguageModelRegistryOptions {
            credentials,
            priority,
            client,
        } = options;
        let client = client.unwrap_or_default();

        let mut seen = Vec::with_capacity(priority.len());
        let mut language_models: Vec<Arc<dyn LanguageModel>> = Vec::new();

        for provider in priority {
            if seen.contains(&provider) {
                continue;
            }
            seen.push(provider);

            if !credentials.is_configured(provider) {
                tracing::debug!(%provider, "provider credential not configured");
                continue;
            }
            let api_key = credentials.get(provider).unwrap_or_default().trim().to_string();

            match provider {
                ProviderId::Groq => language_models.push(Arc::new(GroqModel::new(
                    groq::DEFAULT_MODEL_ID,
                    GroqModelOptions {
                        api_key,
                        client: Some(client.clone()),
                        ..Default::default()
                    },
                ))),
                ProviderId::HuggingFace => language_models.push(Arc::new(HuggingFaceModel::new(
                    huggingface::DEFAULT_MODEL_ID,
                    HuggingFaceModelOptions {
                        api_key,
                        client: Some(client.clone()),
                        ..Default::default()
                    },
                ))),
            }
        }

        Self { language_models }
    }

    /// Build a registry from already constructed adapters, keeping their order.
    pub fn with_models(language_models: Vec<Arc<dyn LanguageModel>>) -> Self {
        Self { language_models }
    }

    /// The highest priority configured model, if any.
    pub fn select(&self) -> Option<Arc<dyn LanguageModel>> {
        self.language_models.first().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.language_models.is_empty()
    }

    pub fn providers(&self) -> Vec<&'static str> {
        self.language_models
            .iter()
            .map(|model| model.provider())
            .collect()
    }
}
