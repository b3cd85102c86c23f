mod config;
mod errors;
mod extractor;
mod generator;
mod normalizer;
mod prompt;
pub mod server;
mod trends;

pub use config::{Config, DEFAULT_TRENDS_FEED_URL};
pub use errors::{ConfigError, GenerateError};
pub use extractor::{
    AnchoredArrayScan, Draft, DraftBatch, DraftExtractor, Extraction, ExtractionTier,
    ParagraphSplit, StaticFallback, StrictArrayScan, DRAFT_COUNT,
};
pub use generator::{GenerationResult, Generator, ProfileAnalysis};
pub use normalizer::{StyleSample, POST_SEPARATOR};
pub use prompt::{build_profile_prompt, build_prompt, GenerationRequest, InputSource, TOPIC_DOMAIN};
pub use trends::{
    parse_headlines, FeedTrendSource, StaticTrendSource, TrendDigest, TrendSource,
    TREND_DIGEST_MAX_CHARS,
};
