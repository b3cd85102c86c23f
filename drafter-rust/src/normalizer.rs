use regex::Regex;
use std::sync::LazyLock;

pub const POST_SEPARATOR: &str = "\n\n--- Post Separator ---\n\n";

static POST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s*-->").expect("post marker pattern is valid"));

/// The user's reference posts, in input order, with no empty segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSample {
    segments: Vec<String>,
}

impl StyleSample {
    /// Split pasted text on `1-->`-style markers. Text without any marker
    /// becomes a single segment.
    pub fn parse(raw: &str) -> Self {
        let segments = POST_MARKER
            .split(raw)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(ToString::to_string)
            .collect();

        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The form embedded verbatim in prompts.
    pub fn joined(&self) -> String {
        self.segments.join(POST_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_numbered_arrows() {
        let sample = StyleSample::parse("1--> Hello world 2--> Second post\n\n10 --> Tenth");

        assert_eq!(sample.segments(), ["Hello world", "Second post", "Tenth"]);
        assert_eq!(
            sample.joined(),
            "Hello world\n\n--- Post Separator ---\n\nSecond post\n\n--- Post Separator ---\n\nTenth"
        );
    }

    #[test]
    fn drops_empty_segments() {
        let sample = StyleSample::parse("  1-->   2--> only one\n3-->\n");
        assert_eq!(sample.segments(), ["only one"]);
    }

    #[test]
    fn unmarked_text_is_one_segment() {
        let sample = StyleSample::parse("  Just a single post.\nWith two lines.  ");
        assert_eq!(sample.len(), 1);
        assert_eq!(sample.joined(), "Just a single post.\nWith two lines.");
    }

    #[test]
    fn blank_text_has_no_segments() {
        assert!(StyleSample::parse(" \n\t ").is_empty());
    }
}
