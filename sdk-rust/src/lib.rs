mod client_utils;
mod errors;
pub mod groq;
pub mod huggingface;
mod language_model;
mod opentelemetry;
mod registry;
pub mod sdk_test;
mod types;

pub use errors::*;
pub use language_model::LanguageModel;
pub use registry::{
    is_configured, LanguageModelRegistry, LanguageModelRegistryOptions, ProviderCredentials,
    ProviderId,
};
pub use types::*;
