//! Sentiment signal model.
//!
//! A sentiment collaborator returns a [`SentimentReport`]; everything derived
//! from it (category, intensity, summary) is computed here so that callers
//! without a collaborator still get a well-formed [`EmotionAnalysis`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maximum text length forwarded to a sentiment collaborator.
pub const SENTIMENT_TEXT_LIMIT: usize = 5000;
pub const SENTIMENT_LANGUAGE: &str = "ko";

const MAX_KEY_PHRASES: usize = 5;
const MAX_ENTITIES: usize = 5;
const FALLBACK_SUMMARY: &str = "감정 분석을 완료할 수 없습니다.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
    Mixed,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
            Self::Mixed => "MIXED",
        }
    }

    fn korean_label(&self) -> &'static str {
        match self {
            Self::Positive => "긍정적",
            Self::Negative => "부정적",
            Self::Neutral => "중립적",
            Self::Mixed => "복합적",
        }
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => Ok(Self::Positive),
            "NEGATIVE" => Ok(Self::Negative),
            "NEUTRAL" => Ok(Self::Neutral),
            "MIXED" => Ok(Self::Mixed),
            other => Err(format!(
                "unsupported sentiment `{other}` (expected positive|negative|neutral|mixed)"
            )),
        }
    }
}

/// Optional enrichment input for risk classification and fallback selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionSignal {
    pub sentiment: Sentiment,
    pub sentiment_confidence: f64,
    pub personality_traits: Vec<String>,
}

impl Default for EmotionSignal {
    fn default() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            sentiment_confidence: 0.5,
            personality_traits: Vec::new(),
        }
    }
}

impl EmotionSignal {
    pub fn with_sentiment(sentiment: Sentiment) -> Self {
        Self { sentiment, ..Self::default() }
    }

    pub fn with_traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.personality_traits = traits.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedEntity {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub confidence: f64,
}

/// Raw answer of a sentiment collaborator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    /// Score per label, e.g. `Positive -> 0.91`.
    pub sentiment_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub key_phrases: Vec<String>,
    #[serde(default)]
    pub entities: Vec<DetectedEntity>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionCategory {
    Excited,
    Happy,
    Pleased,
    Upset,
    Sad,
    Worried,
    Conflicted,
    Calm,
}

impl EmotionCategory {
    pub fn from_sentiment(sentiment: Sentiment, confidence: f64) -> Self {
        match sentiment {
            Sentiment::Positive if confidence > 0.8 => Self::Excited,
            Sentiment::Positive if confidence > 0.6 => Self::Happy,
            Sentiment::Positive => Self::Pleased,
            Sentiment::Negative if confidence > 0.8 => Self::Upset,
            Sentiment::Negative if confidence > 0.6 => Self::Sad,
            Sentiment::Negative => Self::Worried,
            Sentiment::Mixed => Self::Conflicted,
            Sentiment::Neutral => Self::Calm,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionIntensity {
    High,
    Medium,
    Low,
}

impl EmotionIntensity {
    pub fn from_max_score(max_score: f64) -> Self {
        if max_score > 0.8 {
            Self::High
        } else if max_score > 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    pub sentiment: Sentiment,
    pub sentiment_confidence: f64,
    pub sentiment_scores: BTreeMap<String, f64>,
    pub emotion_category: EmotionCategory,
    pub emotion_intensity: EmotionIntensity,
    pub key_phrases: Vec<String>,
    pub entities: Vec<DetectedEntity>,
    pub analysis_summary: String,
}

impl EmotionAnalysis {
    pub fn from_report(report: SentimentReport) -> Self {
        let confidence = report.sentiment_scores.values().copied().fold(0.0_f64, f64::max);
        let key_phrases = report.key_phrases.into_iter().take(MAX_KEY_PHRASES).collect::<Vec<_>>();
        let entities = report.entities.into_iter().take(MAX_ENTITIES).collect::<Vec<_>>();

        Self {
            sentiment: report.sentiment,
            sentiment_confidence: confidence,
            emotion_category: EmotionCategory::from_sentiment(report.sentiment, confidence),
            emotion_intensity: EmotionIntensity::from_max_score(confidence),
            analysis_summary: summarize(report.sentiment, confidence, &key_phrases),
            sentiment_scores: report.sentiment_scores,
            key_phrases,
            entities,
        }
    }

    /// Result used when the collaborator is missing or fails.
    pub fn fallback() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            sentiment_confidence: 0.5,
            sentiment_scores: BTreeMap::from([("Neutral".to_string(), 1.0)]),
            emotion_category: EmotionCategory::Calm,
            emotion_intensity: EmotionIntensity::Medium,
            key_phrases: Vec::new(),
            entities: Vec::new(),
            analysis_summary: FALLBACK_SUMMARY.to_string(),
        }
    }

    pub fn signal(&self) -> EmotionSignal {
        EmotionSignal {
            sentiment: self.sentiment,
            sentiment_confidence: self.sentiment_confidence,
            personality_traits: Vec::new(),
        }
    }
}

pub fn summarize(sentiment: Sentiment, confidence: f64, key_phrases: &[String]) -> String {
    let confidence_label = if confidence > 0.7 {
        "높은"
    } else if confidence > 0.5 {
        "보통"
    } else {
        "낮은"
    };

    let mut summary =
        format!("{confidence_label} 신뢰도로 {} 감정이 감지되었습니다.", sentiment.korean_label());
    if !key_phrases.is_empty() {
        let phrases = key_phrases.iter().take(3).map(String::as_str).collect::<Vec<_>>();
        summary.push_str(&format!(" 주요 키워드: {}", phrases.join(", ")));
    }
    summary
}

/// Truncates to [`SENTIMENT_TEXT_LIMIT`] characters on a char boundary.
pub fn truncate_for_sentiment(text: &str) -> &str {
    match text.char_indices().nth(SENTIMENT_TEXT_LIMIT) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
