//! Recovery of structured drafts from free-form provider output.
//!
//! Extraction runs an ordered chain of [`ExtractionTier`]s. Every tier is
//! total: it either returns drafts or declines, and the next tier is tried.
//! The chain always ends with [`StaticFallback`], so a caller always receives
//! a [`DraftBatch`] of exactly [`DRAFT_COUNT`] drafts.

use postdraft_sdk::ExtractionProfile;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

pub const DRAFT_COUNT: usize = 3;
const RAW_EXCERPT_CHARS: usize = 300;

/// Topical stand-ins used to fill missing slots.
const PLACEHOLDER_DRAFTS: [(&str, &str); DRAFT_COUNT] = [
    (
        "AI-Generated Post 1",
        "Cloud platforms are changing how automotive workshops schedule jobs, order parts and keep customers in the loop...",
    ),
    (
        "AI-Generated Post 2",
        "Based on your style, here's a suggested post about cloud automotive solutions...",
    ),
    (
        "AI-Generated Post 3",
        "Leveraging SaaS technology in the automotive industry...",
    ),
];

static ANCHORED_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\[.*?\{.*?"title".*?"content".*?\}.*?\]"#)
        .expect("anchored array pattern is valid")
});

static SECTION_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\r?\n\r?\n)(?:Post [123]|Draft [123]|\d\.)")
        .expect("section break pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    fn placeholder(index: usize) -> Self {
        let (title, content) = PLACEHOLDER_DRAFTS[index % DRAFT_COUNT];
        Self::new(title, content)
    }
}

/// Exactly [`DRAFT_COUNT`] drafts, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DraftBatch(Vec<Draft>);

impl DraftBatch {
    /// Truncate to [`DRAFT_COUNT`], then fill each missing position with the
    /// placeholder for that position.
    pub fn from_drafts(mut drafts: Vec<Draft>) -> Self {
        drafts.truncate(DRAFT_COUNT);
        for index in drafts.len()..DRAFT_COUNT {
            drafts.push(Draft::placeholder(index));
        }
        Self(drafts)
    }

    pub fn drafts(&self) -> &[Draft] {
        &self.0
    }

    pub fn into_drafts(self) -> Vec<Draft> {
        self.0
    }
}

/// One strategy in the extraction chain.
pub trait ExtractionTier: Send + Sync {
    fn name(&self) -> &'static str;
    /// `None` hands the raw text to the next tier.
    fn extract(&self, raw: &str) -> Option<Vec<Draft>>;
}

/// Parses the first bracket-delimited JSON array in the text, or the text
/// itself when it is JSON.
pub struct StrictArrayScan;

impl ExtractionTier for StrictArrayScan {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn extract(&self, raw: &str) -> Option<Vec<Draft>> {
        if let (Some(start), Some(end)) = (raw.find('['), raw.rfind(']')) {
            if start < end {
                if let Some(drafts) = parse_drafts(&raw[start..=end]) {
                    return Some(drafts);
                }
            }
        }

        parse_drafts(raw.trim()).or_else(|| first_embedded_array(raw, 0))
    }
}

/// Like [`StrictArrayScan`], but only considers arrays that mention both the
/// `"title"` and `"content"` fields.
pub struct AnchoredArrayScan;

impl ExtractionTier for AnchoredArrayScan {
    fn name(&self) -> &'static str {
        "anchored"
    }

    fn extract(&self, raw: &str) -> Option<Vec<Draft>> {
        let candidate = ANCHORED_ARRAY.find(raw)?;
        parse_drafts(candidate.as_str()).or_else(|| first_embedded_array(raw, candidate.start()))
    }
}

/// Splits prose on blank lines introducing `Post N`, `Draft N` or `N.`.
pub struct ParagraphSplit;

impl ExtractionTier for ParagraphSplit {
    fn name(&self) -> &'static str {
        "paragraphs"
    }

    fn extract(&self, raw: &str) -> Option<Vec<Draft>> {
        let mut sections = Vec::new();
        let mut section_start = 0;
        for section_break in SECTION_BREAK.captures_iter(raw) {
            // Keep the marker with the section it introduces.
            let Some(blank_line) = section_break.get(1) else {
                continue;
            };
            let marker_start = blank_line.end();
            sections.push(&raw[section_start..marker_start]);
            section_start = marker_start;
        }
        sections.push(&raw[section_start..]);

        let drafts: Vec<Draft> = sections
            .into_iter()
            .map(str::trim)
            .filter(|section| !section.is_empty())
            .take(DRAFT_COUNT)
            .enumerate()
            .map(|(index, section)| Draft::new(format!("Post Idea {}", index + 1), section))
            .collect();

        (!drafts.is_empty()).then_some(drafts)
    }
}

/// Last resort: an excerpt of the raw text followed by placeholders.
pub struct StaticFallback;

impl StaticFallback {
    fn drafts(raw: &str) -> Vec<Draft> {
        let excerpt: String = raw.trim().chars().take(RAW_EXCERPT_CHARS).collect();
        let mut drafts: Vec<Draft> = (0..DRAFT_COUNT).map(Draft::placeholder).collect();
        if !excerpt.is_empty() {
            drafts[0].content = excerpt;
        }
        drafts
    }
}

impl ExtractionTier for StaticFallback {
    fn name(&self) -> &'static str {
        "static"
    }

    fn extract(&self, raw: &str) -> Option<Vec<Draft>> {
        Some(Self::drafts(raw))
    }
}

/// The outcome of running the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub batch: DraftBatch,
    /// Name of the tier that produced the drafts.
    pub tier: &'static str,
    /// Whether a tier other than the first one had to be used.
    pub degraded: bool,
}

pub struct DraftExtractor {
    tiers: Vec<Box<dyn ExtractionTier>>,
}

impl DraftExtractor {
    pub fn new(tiers: Vec<Box<dyn ExtractionTier>>) -> Self {
        Self { tiers }
    }

    /// The chain suited to a provider's output quality.
    pub fn for_profile(profile: ExtractionProfile) -> Self {
        let first: Box<dyn ExtractionTier> = match profile {
            ExtractionProfile::Strict => Box::new(StrictArrayScan),
            ExtractionProfile::Anchored => Box::new(AnchoredArrayScan),
        };
        Self::new(vec![first, Box::new(ParagraphSplit), Box::new(StaticFallback)])
    }

    pub fn extract(&self, raw: &str) -> Extraction {
        for (index, tier) in self.tiers.iter().enumerate() {
            let Some(drafts) = tier.extract(raw) else {
                continue;
            };

            let degraded = index > 0;
            if degraded {
                tracing::warn!(tier = tier.name(), "draft extraction degraded");
            }
            if drafts.len() < DRAFT_COUNT {
                tracing::debug!(
                    tier = tier.name(),
                    parsed = drafts.len(),
                    "padding drafts with placeholders"
                );
            }

            return Extraction {
                batch: DraftBatch::from_drafts(drafts),
                tier: tier.name(),
                degraded,
            };
        }

        tracing::warn!(tier = StaticFallback.name(), "draft extraction degraded");
        Extraction {
            batch: DraftBatch::from_drafts(StaticFallback::drafts(raw)),
            tier: StaticFallback.name(),
            degraded: true,
        }
    }
}

fn parse_drafts(text: &str) -> Option<Vec<Draft>> {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(drafts_from_value)
}

/// The first complete JSON value starting at a `[` at or after `from` that
/// yields drafts. Tolerates trailing prose and stray brackets.
fn first_embedded_array(raw: &str, from: usize) -> Option<Vec<Draft>> {
    raw[from..].match_indices('[').find_map(|(offset, _)| {
        let mut values =
            serde_json::Deserializer::from_str(&raw[from + offset..]).into_iter::<Value>();
        match values.next() {
            Some(Ok(value)) => drafts_from_value(value),
            _ => None,
        }
    })
}

/// Accepts an array of `{title, content}` objects, or an object wrapping one
/// under `drafts` or `posts`. Entries without content are dropped and missing
/// titles get a generic one.
fn drafts_from_value(value: Value) -> Option<Vec<Draft>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object
            .remove("drafts")
            .or_else(|| object.remove("posts"))
        {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };

    let drafts: Vec<Draft> = items
        .iter()
        .filter_map(|item| {
            let content = item.get("content").and_then(Value::as_str)?.trim();
            if content.is_empty() {
                return None;
            }
            let title = item
                .get("title")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|title| !title.is_empty());
            Some((title.map(ToString::to_string), content.to_string()))
        })
        .enumerate()
        .map(|(index, (title, content))| Draft {
            title: title.unwrap_or_else(|| format!("Post Idea {}", index + 1)),
            content,
        })
        .collect();

    (!drafts.is_empty()).then_some(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_drafts() -> Vec<Draft> {
        vec![
            Draft::new("Cloud DMS wins", "Workshops are moving to the cloud 🚗"),
            Draft::new("Parts in real time", "Inventory sync changed everything.\n\nHere's how."),
            Draft::new("Connected service", "Telematics + SaaS = fewer surprises."),
        ]
    }

    #[test]
    fn strict_round_trips_a_clean_array() {
        let raw = serde_json::to_string(&three_drafts()).unwrap();
        assert_eq!(StrictArrayScan.extract(&raw), Some(three_drafts()));
    }

    #[test]
    fn strict_finds_an_array_inside_prose() {
        let raw = format!(
            "Sure! Here are your drafts:\n{}\nLet me know if you want changes.",
            serde_json::to_string_pretty(&three_drafts()).unwrap()
        );
        assert_eq!(StrictArrayScan.extract(&raw), Some(three_drafts()));
    }

    #[test]
    fn strict_ignores_trailing_brackets_after_the_array() {
        let raw = r#"[{"title":"A","content":"B"}] (see [1] for sources)"#;
        assert_eq!(StrictArrayScan.extract(raw), Some(vec![Draft::new("A", "B")]));
    }

    #[test]
    fn strict_accepts_wrapped_object() {
        let raw = r#"{"drafts":[{"title":"A","content":"B"}]}"#;
        assert_eq!(StrictArrayScan.extract(raw), Some(vec![Draft::new("A", "B")]));
    }

    #[test]
    fn strict_declines_prose_and_unrelated_arrays() {
        assert_eq!(StrictArrayScan.extract("no json here"), None);
        assert_eq!(StrictArrayScan.extract("values [1, 2, 3]"), None);
        assert_eq!(StrictArrayScan.extract("[]"), None);
        assert_eq!(StrictArrayScan.extract(""), None);
    }

    #[test]
    fn missing_titles_are_synthesized_and_empty_content_dropped() {
        let raw = r#"[{"content":"first"},{"title":"x","content":"  "},{"title":" ","content":"second"}]"#;
        assert_eq!(
            StrictArrayScan.extract(raw),
            Some(vec![
                Draft::new("Post Idea 1", "first"),
                Draft::new("Post Idea 2", "second"),
            ])
        );
    }

    #[test]
    fn anchored_requires_field_markers() {
        assert_eq!(AnchoredArrayScan.extract("see [1] and [2]"), None);

        let raw = r#"Notes [draft] <s> [{"title": "A", "content": "B"}, {"title": "C", "content": "D"}] done"#;
        assert_eq!(
            AnchoredArrayScan.extract(raw),
            Some(vec![Draft::new("A", "B"), Draft::new("C", "D")])
        );
    }

    #[test]
    fn anchored_recovers_when_content_contains_braces() {
        let raw = r#"[{"title": "A", "content": "use {braces} and ] here"}]"#;
        assert_eq!(
            AnchoredArrayScan.extract(raw),
            Some(vec![Draft::new("A", "use {braces} and ] here")])
        );
    }

    #[test]
    fn paragraph_split_on_post_markers() {
        let raw = "Post 1: Cloud is here.\n\nPost 2: Workshops adapt.\n\nPost 3: SaaS wins.\n\nPost 1 again";
        assert_eq!(
            ParagraphSplit.extract(raw),
            Some(vec![
                Draft::new("Post Idea 1", "Post 1: Cloud is here."),
                Draft::new("Post Idea 2", "Post 2: Workshops adapt."),
                Draft::new("Post Idea 3", "Post 3: SaaS wins."),
            ])
        );
    }

    #[test]
    fn paragraph_split_on_numbered_lines_keeps_plain_paragraphs_together() {
        let raw = "Intro line\n\nstill intro\n\n1. First idea\n\n2. Second idea";
        assert_eq!(
            ParagraphSplit.extract(raw),
            Some(vec![
                Draft::new("Post Idea 1", "Intro line\n\nstill intro"),
                Draft::new("Post Idea 2", "1. First idea"),
                Draft::new("Post Idea 3", "2. Second idea"),
            ])
        );
    }

    #[test]
    fn paragraph_split_handles_crlf_blank_lines() {
        let raw = "Post 1: a\r\n\r\nPost 2: b\r\n\r\nPost 3: c";
        assert_eq!(
            ParagraphSplit.extract(raw),
            Some(vec![
                Draft::new("Post Idea 1", "Post 1: a"),
                Draft::new("Post Idea 2", "Post 2: b"),
                Draft::new("Post Idea 3", "Post 3: c"),
            ])
        );
    }

    #[test]
    fn paragraph_split_declines_blank_text() {
        assert_eq!(ParagraphSplit.extract("  \n\n  "), None);
    }

    #[test]
    fn static_fallback_uses_an_excerpt_of_the_raw_text() {
        let raw = "x".repeat(1000);
        let drafts = StaticFallback.extract(&raw).unwrap();
        assert_eq!(drafts.len(), DRAFT_COUNT);
        assert_eq!(drafts[0].content.chars().count(), RAW_EXCERPT_CHARS);
        assert_eq!(drafts[1], Draft::placeholder(1));
        assert_eq!(drafts[2], Draft::placeholder(2));

        let drafts = StaticFallback.extract("").unwrap();
        assert_eq!(drafts[0], Draft::placeholder(0));
    }

    #[test]
    fn batch_is_padded_by_position_and_truncated() {
        let padded = DraftBatch::from_drafts(vec![Draft::new("A", "B")]);
        assert_eq!(
            padded.drafts(),
            [Draft::new("A", "B"), Draft::placeholder(1), Draft::placeholder(2)]
        );

        let mut many = three_drafts();
        many.push(Draft::new("extra", "dropped"));
        assert_eq!(DraftBatch::from_drafts(many).into_drafts(), three_drafts());
    }

    #[test]
    fn chain_always_returns_three_drafts() {
        let clean = serde_json::to_string(&three_drafts()).unwrap();
        let embedded = format!("Here you go:\n{clean}\nEnjoy!");
        let cases = [
            (clean.as_str(), "strict", false),
            (embedded.as_str(), "strict", false),
            ("Just some prose without structure.", "paragraphs", true),
            ("", "static", true),
        ];

        let extractor = DraftExtractor::for_profile(ExtractionProfile::Strict);
        for (raw, tier, degraded) in cases {
            let extraction = extractor.extract(raw);
            assert_eq!(extraction.batch.drafts().len(), DRAFT_COUNT, "raw: {raw:?}");
            assert_eq!(extraction.tier, tier, "raw: {raw:?}");
            assert_eq!(extraction.degraded, degraded, "raw: {raw:?}");
        }
    }

    #[test]
    fn anchored_chain_skips_arrays_without_fields() {
        let extraction = DraftExtractor::for_profile(ExtractionProfile::Anchored)
            .extract("[\"a\", \"b\"] is all I have");

        assert_eq!(extraction.tier, "paragraphs");
        assert_eq!(
            extraction.batch.drafts()[0],
            Draft::new("Post Idea 1", "[\"a\", \"b\"] is all I have")
        );
    }

    #[test]
    fn chain_without_tiers_still_satisfies_the_contract() {
        let extraction = DraftExtractor::new(Vec::new()).extract("anything");
        assert_eq!(extraction.tier, "static");
        assert_eq!(extraction.batch.drafts()[0].content, "anything");
    }
}
