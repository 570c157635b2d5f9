use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed vocabulary the upstream model is asked to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Map raw model output onto the closed set.
    ///
    /// Anything outside the vocabulary falls back to [`Sentiment::Neutral`].
    pub fn normalize(raw: &str) -> Self {
        raw.parse().unwrap_or(Sentiment::Neutral)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sentiment label: {0}")]
pub struct UnknownSentiment(pub String);

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(UnknownSentiment(other.to_string())),
        }
    }
}

/// Shorten `text` to at most `max_chars` characters for log context.
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_labels() {
        assert_eq!("positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!("negative".parse::<Sentiment>().unwrap(), Sentiment::Negative);
        assert_eq!("neutral".parse::<Sentiment>().unwrap(), Sentiment::Neutral);
    }

    #[test]
    fn parse_is_case_and_whitespace_insensitive() {
        assert_eq!(" Positive\n".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!("NEGATIVE".parse::<Sentiment>().unwrap(), Sentiment::Negative);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "mixed".parse::<Sentiment>().unwrap_err();
        assert_eq!(err.to_string(), "unknown sentiment label: mixed");
    }

    #[test]
    fn unknown_label_is_std_error() {
        let err: Box<dyn std::error::Error + Send + Sync> = Box::new(UnknownSentiment("meh".into()));
        assert_eq!(err.to_string(), "unknown sentiment label: meh");
    }

    #[test]
    fn normalize_falls_back_to_neutral() {
        assert_eq!(Sentiment::normalize("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::normalize("positive."), Sentiment::Neutral);
        assert_eq!(Sentiment::normalize("I think it's great"), Sentiment::Neutral);
        assert_eq!(Sentiment::normalize(""), Sentiment::Neutral);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Sentiment::Negative).unwrap();
        assert_eq!(json, r#""negative""#);
    }

    #[test]
    fn truncate_short_text_untouched() {
        assert_eq!(truncate_for_log("short", 50), "short");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "ééééé";
        assert_eq!(truncate_for_log(text, 2), "éé...");
    }
}
