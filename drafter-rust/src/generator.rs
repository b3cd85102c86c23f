use crate::{
    build_profile_prompt, build_prompt, Config, ConfigError, DraftBatch, DraftExtractor,
    FeedTrendSource, GenerateError, GenerationRequest, InputSource, StyleSample, TrendDigest,
    TrendSource,
};
use postdraft_sdk::{LanguageModel, LanguageModelRegistry, LanguageModelRegistryOptions};
use std::sync::Arc;
use tracing::Instrument;

const PROFILE_MESSAGE: &str = "LinkedIn profile analysis requires manual post input";
const PROFILE_SUGGESTION: &str =
    "Please paste 3-5 of your recent LinkedIn posts to analyze your style";

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub drafts: DraftBatch,
    pub trend_digest: TrendDigest,
    /// Label of the provider that produced the drafts.
    pub provider_used: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileAnalysis {
    pub message: String,
    pub details: String,
    pub suggestion: String,
}

/// Runs one request/response cycle: select a provider, gather context, prompt,
/// and recover drafts. Holds no per-request state, so it can serve concurrent
/// requests through a shared reference.
pub struct Generator {
    registry: LanguageModelRegistry,
    trend_source: Arc<dyn TrendSource>,
}

impl Generator {
    pub fn new(registry: LanguageModelRegistry, trend_source: Arc<dyn TrendSource>) -> Self {
        Self {
            registry,
            trend_source,
        }
    }

    /// Wire the live providers and the RSS trend feed from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let client = config.http_client()?;
        let registry = LanguageModelRegistry::new(LanguageModelRegistryOptions {
            credentials: config.credentials.clone(),
            priority: config.provider_priority.clone(),
            client: Some(client.clone()),
        });
        let trend_source = FeedTrendSource::new(client, config.trends_feed_url.clone());

        Ok(Self::new(registry, Arc::new(trend_source)))
    }

    pub fn has_provider(&self) -> bool {
        !self.registry.is_empty()
    }

    pub async fn generate(
        &self,
        raw_input: &str,
        input_source: InputSource,
    ) -> Result<GenerationResult, GenerateError> {
        if raw_input.trim().is_empty() {
            return Err(GenerateError::Validation(
                "Posts content is required".to_string(),
            ));
        }

        let model = self.select_model()?;
        let span = tracing::info_span!(
            "postdraft.generate",
            provider = model.provider(),
            input_source = ?input_source
        );

        async move {
            let trend_digest = self.trend_source.fetch_trends().await;
            let style_sample = StyleSample::parse(raw_input);
            tracing::debug!(segments = style_sample.len(), "normalized style sample");

            let request = GenerationRequest::new(style_sample, trend_digest, input_source);
            let input = build_prompt(&request, model.prompt_format());
            let response = model.generate(input).await?;

            let extraction =
                DraftExtractor::for_profile(model.extraction_profile()).extract(&response.text);
            tracing::info!(
                tier = extraction.tier,
                degraded = extraction.degraded,
                "generated drafts"
            );

            Ok::<_, GenerateError>(GenerationResult {
                drafts: extraction.batch,
                trend_digest: request.into_trend_digest(),
                provider_used: model.label(),
            })
        }
        .instrument(span)
        .await
    }

    /// Profiles cannot be read directly; ask the provider for a friendly
    /// explanation and point the user to the paste flow.
    pub async fn analyze_profile(
        &self,
        linkedin_url: &str,
    ) -> Result<ProfileAnalysis, GenerateError> {
        let linkedin_url = linkedin_url.trim();
        if linkedin_url.is_empty() {
            return Err(GenerateError::Validation(
                "LinkedIn URL is required".to_string(),
            ));
        }

        let model = self.select_model()?;
        let input = build_profile_prompt(linkedin_url, model.prompt_format());
        let response = model
            .generate(input)
            .instrument(tracing::info_span!(
                "postdraft.analyze_profile",
                provider = model.provider()
            ))
            .await?;

        Ok(ProfileAnalysis {
            message: PROFILE_MESSAGE.to_string(),
            details: response.text,
            suggestion: PROFILE_SUGGESTION.to_string(),
        })
    }

    fn select_model(&self) -> Result<Arc<dyn LanguageModel>, GenerateError> {
        self.registry.select().ok_or_else(|| {
            tracing::warn!("no provider credential configured");
            GenerateError::no_provider_available()
        })
    }
}
