//! Coarse capability family derived from a model's short id.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// General-purpose Gemini LLMs.
    Gemini,
    /// Lightweight open-weights Gemma LLMs.
    Gemma,
    Embeddings,
    ImageVideo,
    AudioLive,
    Other,
}

/// Ordered substring rules; first match wins. Live/audio/image/embedding
/// rules must stay ahead of the generic "gemini" rule.
const RULES: &[(&[&str], Family)] = &[
    (&["embedding"], Family::Embeddings),
    (&["imagen", "image", "veo", "video"], Family::ImageVideo),
    (
        &["audio", "tts", "asr", "native-audio", "live"],
        Family::AudioLive,
    ),
    (&["gemma"], Family::Gemma),
    (&["gemini"], Family::Gemini),
];

/// Classify a short id (case-insensitive).
pub fn classify(short_id: &str) -> Family {
    let id = short_id.to_lowercase();
    RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| id.contains(n)))
        .map(|(_, family)| *family)
        .unwrap_or(Family::Other)
}

impl Family {
    pub const ALL: [Family; 6] = [
        Family::Gemini,
        Family::Gemma,
        Family::Embeddings,
        Family::ImageVideo,
        Family::AudioLive,
        Family::Other,
    ];

    /// Human-readable label; also part of the text-search haystack.
    pub fn label(self) -> &'static str {
        match self {
            Family::Gemini => "Gemini (LLM)",
            Family::Gemma => "Gemma (lightweight LLM)",
            Family::Embeddings => "Embeddings",
            Family::ImageVideo => "Image / Video",
            Family::AudioLive => "Audio / Live",
            Family::Other => "Other",
        }
    }

    /// Short name used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Family::Gemini => "gemini",
            Family::Gemma => "gemma",
            Family::Embeddings => "embeddings",
            Family::ImageVideo => "image-video",
            Family::AudioLive => "audio-live",
            Family::Other => "other",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown family '{0}' (expected one of: gemini, gemma, embeddings, image-video, audio-live, other)")]
pub struct UnknownFamily(String);

impl FromStr for Family {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Family::ALL
            .into_iter()
            .find(|f| f.slug() == wanted)
            .ok_or_else(|| UnknownFamily(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_rule() {
        assert_eq!(classify("text-embedding-004"), Family::Embeddings);
        assert_eq!(classify("imagen-4.0-generate-001"), Family::ImageVideo);
        assert_eq!(classify("veo-3.0-generate-001"), Family::ImageVideo);
        assert_eq!(classify("gemini-2.5-flash-preview-tts"), Family::AudioLive);
        assert_eq!(classify("gemma-3-27b-it"), Family::Gemma);
        assert_eq!(classify("gemini-2.5-pro"), Family::Gemini);
        assert_eq!(classify("aqa"), Family::Other);
        assert_eq!(classify(""), Family::Other);
    }

    #[test]
    fn live_variant_is_audio_not_llm() {
        assert_eq!(classify("gemini-2.0-flash-live-001"), Family::AudioLive);
        assert_eq!(
            classify("gemini-2.5-flash-native-audio-preview"),
            Family::AudioLive
        );
    }

    #[test]
    fn earlier_rules_take_precedence() {
        assert_eq!(classify("gemini-embedding-001"), Family::Embeddings);
        assert_eq!(classify("gemini-2.5-flash-image"), Family::ImageVideo);
        // "video" precedes "live"
        assert_eq!(classify("live-video-gemini"), Family::ImageVideo);
    }

    #[test]
    fn classification_is_case_insensitive_and_deterministic() {
        for id in ["Gemini-2.5-PRO", "TEXT-EMBEDDING-004", "Gemma-2b", "x"] {
            let first = classify(id);
            for _ in 0..5 {
                assert_eq!(classify(id), first);
            }
        }
        assert_eq!(classify("Gemini-2.5-PRO"), Family::Gemini);
    }

    #[test]
    fn parses_slugs() {
        for family in Family::ALL {
            assert_eq!(family.slug().parse::<Family>().unwrap(), family);
        }
        assert_eq!("Image_Video".parse::<Family>().unwrap(), Family::ImageVideo);
        assert!("llm".parse::<Family>().is_err());
    }
}
