use crate::{StyleSample, TrendDigest};
use postdraft_sdk::{LanguageModelInput, PromptFormat};

/// The topical domain every draft is restricted to.
pub const TOPIC_DOMAIN: &str = "Cloud Automotive SaaS";

const DRAFTS_SYSTEM_PROMPT: &str = "You are a helpful assistant that generates authentic LinkedIn posts. You analyze writing style carefully and create posts that match the user's voice perfectly. Always return valid JSON.";
const PROFILE_SYSTEM_PROMPT: &str =
    "You are a helpful assistant for a LinkedIn content generation tool.";

/// Where the style sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    #[default]
    Pasted,
    Profile,
}

impl InputSource {
    /// `"profile"` selects [`InputSource::Profile`]; anything else, including
    /// a missing label, is treated as pasted posts.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(label) if label.eq_ignore_ascii_case("profile") => Self::Profile,
            _ => Self::Pasted,
        }
    }

    fn style_reference(self) -> &'static str {
        match self {
            Self::Pasted => "recent",
            Self::Profile => "LinkedIn profile",
        }
    }
}

/// Everything a provider needs to write the drafts. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    style_sample: StyleSample,
    trend_digest: TrendDigest,
    input_source: InputSource,
}

impl GenerationRequest {
    pub fn new(
        style_sample: StyleSample,
        trend_digest: TrendDigest,
        input_source: InputSource,
    ) -> Self {
        Self {
            style_sample,
            trend_digest,
            input_source,
        }
    }

    pub fn style_sample(&self) -> &StyleSample {
        &self.style_sample
    }

    pub fn trend_digest(&self) -> &TrendDigest {
        &self.trend_digest
    }

    pub fn input_source(&self) -> InputSource {
        self.input_source
    }

    pub fn into_trend_digest(self) -> TrendDigest {
        self.trend_digest
    }
}

/// Frame the drafting instructions for a provider. The payload (sample,
/// trends, constraints) is the same for every format; only the wrapping
/// differs. Generation parameters are left to the provider defaults.
pub fn build_prompt(request: &GenerationRequest, format: PromptFormat) -> LanguageModelInput {
    let posts = request.style_sample().joined();
    let trends = request.trend_digest().as_str();
    let reference = request.input_source().style_reference();

    match format {
        PromptFormat::Chat => LanguageModelInput {
            system_prompt: Some(DRAFTS_SYSTEM_PROMPT.to_string()),
            prompt: format!(
                r#"I need you to generate 3 powerful LinkedIn post drafts based on the following:

STYLE REFERENCE (User's {reference} posts):
{posts}

TRENDING TOPICS IN {domain_upper}:
{trends}

INSTRUCTIONS:
Generate 3 LinkedIn post drafts that:
1. Match the EXACT style, tone, and voice of the reference posts above
2. Respect the same emoji usage patterns (or lack thereof)
3. Follow similar formatting (paragraphs, spacing, line breaks)
4. Maintain similar length and structure
5. Focus on {domain} topics from the trending headlines
6. Sound authentic, professional, and engaging
7. Are ready to post (complete, polished drafts)

Format your response as JSON array with this structure:
[
  {{
    "title": "Brief topic (3-5 words)",
    "content": "Full post content with proper formatting and emojis"
  }}
]

Make each post unique and valuable. Ensure they sound like they were written by the same person who wrote the reference posts."#,
                domain = TOPIC_DOMAIN,
                domain_upper = TOPIC_DOMAIN.to_uppercase(),
            ),
            ..Default::default()
        },
        PromptFormat::Instruct => LanguageModelInput {
            system_prompt: None,
            prompt: format!(
                r#"<s>[INST] You are a LinkedIn content expert. Based on these sample posts, generate 3 new LinkedIn posts about {domain} topics.

Sample Posts (user's {reference} posts):
{posts}

Trending Topics:
{trends}

Generate 3 posts in the same style: match the tone, voice, emoji usage, formatting and length of the samples, and stay on {domain} topics. Return ONLY a valid JSON array like this:
[{{"title": "Topic 1", "content": "Post 1 content"}}, {{"title": "Topic 2", "content": "Post 2 content"}}, {{"title": "Topic 3", "content": "Post 3 content"}}]
[/INST]"#,
                domain = TOPIC_DOMAIN,
            ),
            ..Default::default()
        },
    }
}

/// Prompt for the profile-link flow, which cannot read the profile itself.
pub fn build_profile_prompt(linkedin_url: &str, format: PromptFormat) -> LanguageModelInput {
    let instructions = format!(
        "You are analyzing a LinkedIn profile URL: {linkedin_url}

Since we cannot directly scrape LinkedIn (requires authentication), provide a helpful response that:
1. Acknowledges the profile URL
2. Explains that direct LinkedIn scraping requires authentication
3. Suggests the user paste 3-5 of their recent posts instead

Keep it friendly and helpful. Format as JSON with fields: message, suggestion"
    );

    let (system_prompt, prompt) = match format {
        PromptFormat::Chat => (Some(PROFILE_SYSTEM_PROMPT.to_string()), instructions),
        PromptFormat::Instruct => (
            None,
            format!("<s>[INST] {PROFILE_SYSTEM_PROMPT}\n\n{instructions} [/INST]"),
        ),
    };

    LanguageModelInput {
        system_prompt,
        prompt,
        max_tokens: Some(500),
        temperature: Some(0.7),
        top_p: None,
    }
}
