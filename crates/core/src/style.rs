//! Conversational register inference from raw chat messages.
//!
//! The analyzer aggregates a message history into a [`StyleProfile`]. Order
//! of messages does not matter. Formality and tone are counted once per
//! message; emoticons are counted once per match.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Honorific sentence endings that mark a message as formal.
pub const FORMAL_MARKERS: [&str; 7] = ["요", "습니다", "해요", "입니다", "세요", "시죠", "죠"];

pub const POSITIVE_WORDS: [&str; 7] = ["좋아", "최고", "대박", "완전", "진짜", "헐", "와"];

pub const NEGATIVE_WORDS: [&str; 6] = ["싫어", "별로", "아니", "안돼", "힘들어", "ㅠㅠ"];

const FORMAL_THRESHOLD: f64 = 0.7;
const SEMI_FORMAL_THRESHOLD: f64 = 0.3;

// Laugh/cry jamo runs count once per run.
static EMOJI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ㅋ+|ㅎ+|ㅠ+|ㅜ+|[\x{1F600}-\x{1F64F}]|:\)|:\(|:D|XD|><|T_T|\^\^")
        .expect("emoji pattern is a valid regex")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    pub fn korean_label(&self) -> &'static str {
        match self {
            Self::Positive => "긍정적",
            Self::Negative => "부정적",
            Self::Neutral => "중립적",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechStyle {
    Formal,
    SemiFormal,
    Casual,
}

impl SpeechStyle {
    pub fn from_formal_ratio(formal_ratio: f64) -> Self {
        if formal_ratio > FORMAL_THRESHOLD {
            Self::Formal
        } else if formal_ratio > SEMI_FORMAL_THRESHOLD {
            Self::SemiFormal
        } else {
            Self::Casual
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::SemiFormal => "semi_formal",
            Self::Casual => "casual",
        }
    }

    pub fn korean_label(&self) -> &'static str {
        match self {
            Self::Formal => "존댓말",
            Self::SemiFormal => "반존대",
            Self::Casual => "반말",
        }
    }
}

/// Aggregate register of a message history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// Fraction of messages carrying at least one honorific marker.
    pub formal_ratio: f64,
    /// Mean emoticon matches per message; not bounded above.
    pub emoji_ratio: f64,
    /// Mean message length in Unicode scalar values.
    pub avg_length: f64,
    pub total_messages: usize,
    pub tone: Tone,
    pub speech_style: SpeechStyle,
}

impl Default for StyleProfile {
    /// The profile assumed when there is no message history.
    fn default() -> Self {
        Self {
            formal_ratio: 0.5,
            emoji_ratio: 0.2,
            avg_length: 10.0,
            total_messages: 0,
            tone: Tone::Neutral,
            speech_style: SpeechStyle::Casual,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StyleAnalyzer;

impl StyleAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze<S>(&self, messages: &[S]) -> StyleProfile
    where
        S: AsRef<str>,
    {
        let total_messages = messages.len();
        if total_messages == 0 {
            return StyleProfile::default();
        }

        let mut formal_count = 0usize;
        let mut emoji_count = 0usize;
        let mut total_length = 0usize;
        let mut positive_count = 0usize;
        let mut negative_count = 0usize;

        for message in messages {
            let message = message.as_ref();
            if contains_any(message, &FORMAL_MARKERS) {
                formal_count += 1;
            }
            if contains_any(message, &POSITIVE_WORDS) {
                positive_count += 1;
            }
            if contains_any(message, &NEGATIVE_WORDS) {
                negative_count += 1;
            }
            emoji_count += count_emoticons(message);
            total_length += message.chars().count();
        }

        let total = total_messages as f64;
        let formal_ratio = formal_count as f64 / total;

        StyleProfile {
            formal_ratio,
            emoji_ratio: emoji_count as f64 / total,
            avg_length: total_length as f64 / total,
            total_messages,
            tone: majority_tone(positive_count, negative_count),
            speech_style: SpeechStyle::from_formal_ratio(formal_ratio),
        }
    }
}

/// Shorthand for `StyleAnalyzer::new().analyze(messages)`.
pub fn analyze<S>(messages: &[S]) -> StyleProfile
where
    S: AsRef<str>,
{
    StyleAnalyzer::new().analyze(messages)
}

pub fn count_emoticons(message: &str) -> usize {
    EMOJI_PATTERN.find_iter(message).count()
}

fn contains_any(message: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| message.contains(needle))
}

fn majority_tone(positive_count: usize, negative_count: usize) -> Tone {
    use std::cmp::Ordering::*;

    match positive_count.cmp(&negative_count) {
        Greater => Tone::Positive,
        Less => Tone::Negative,
        Equal => Tone::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::{analyze, count_emoticons, SpeechStyle, StyleProfile, Tone};

    #[test]
    fn empty_history_yields_fixed_default_profile() {
        let profile = analyze::<&str>(&[]);

        assert_eq!(profile.formal_ratio, 0.5);
        assert_eq!(profile.emoji_ratio, 0.2);
        assert_eq!(profile.avg_length, 10.0);
        assert_eq!(profile.total_messages, 0);
        assert_eq!(profile.tone, Tone::Neutral);
        assert_eq!(profile.speech_style, SpeechStyle::Casual);
        assert_eq!(profile, StyleProfile::default());
    }

    #[test]
    fn honorific_ending_marks_message_formal() {
        let profile = analyze(&["밥 먹었어요?"]);

        assert_eq!(profile.formal_ratio, 1.0);
        assert_eq!(profile.total_messages, 1);
        assert_eq!(profile.speech_style, SpeechStyle::Formal);
    }

    #[test]
    fn formal_message_counts_once_despite_multiple_markers() {
        let profile = analyze(&["감사합니다 좋은 하루 되세요", "응 그래"]);

        assert_eq!(profile.formal_ratio, 0.5);
        assert_eq!(profile.speech_style, SpeechStyle::SemiFormal);
    }

    #[test]
    fn laugh_run_counts_as_one_emoticon() {
        let profile = analyze(&["ㅋㅋㅋ 완전 웃김"]);

        assert!(profile.emoji_ratio >= 1.0);
        assert_eq!(count_emoticons("ㅋㅋㅋ 완전 웃김"), 1);
    }

    #[test]
    fn emoticons_are_counted_per_match() {
        assert_eq!(count_emoticons("ㅋㅋ 진짜? ㅎㅎ 😊 ^^ T_T"), 5);
        assert_eq!(count_emoticons(":) :( :D XD ><"), 5);
        assert_eq!(count_emoticons("그냥 평범한 문장"), 0);
    }

    #[test]
    fn average_length_counts_code_points_not_bytes() {
        let profile = analyze(&["안녕", "abcd"]);

        assert_eq!(profile.avg_length, 3.0);
    }

    #[test]
    fn tone_is_majority_vote_counted_once_per_message() {
        let positive = analyze(&["진짜 대박 최고", "별로야", "와 좋아"]);
        assert_eq!(positive.tone, Tone::Positive);

        let negative = analyze(&["싫어 ㅠㅠ", "힘들어", "좋아"]);
        assert_eq!(negative.tone, Tone::Negative);

        let tied = analyze(&["좋아", "싫어"]);
        assert_eq!(tied.tone, Tone::Neutral);
    }

    #[test]
    fn ratios_stay_in_domain_for_mixed_history() {
        let messages = ["요즘 바빠요?", "넵 맞아요", "ㅋㅋ 알겠어", "오늘 뭐해"];
        let profile = analyze(&messages);

        assert!((0.0..=1.0).contains(&profile.formal_ratio));
        assert_eq!(profile.total_messages, messages.len());
        assert_eq!(profile.formal_ratio, 0.5);
    }

    #[test]
    fn speech_style_thresholds_are_exclusive() {
        assert_eq!(SpeechStyle::from_formal_ratio(0.7), SpeechStyle::SemiFormal);
        assert_eq!(SpeechStyle::from_formal_ratio(0.71), SpeechStyle::Formal);
        assert_eq!(SpeechStyle::from_formal_ratio(0.3), SpeechStyle::Casual);
        assert_eq!(SpeechStyle::from_formal_ratio(0.31), SpeechStyle::SemiFormal);
    }

    #[test]
    fn profile_serializes_with_snake_case_labels() {
        let profile = analyze(&["감사합니다", "좋아요", "네 알겠습니다", "그래"]);
        let json = serde_json::to_value(&profile).expect("serialize profile");

        // 합니다 is not a formal marker, so only 좋아요 and 알겠습니다 count.
        assert_eq!(json["formal_ratio"], 0.5);
        assert_eq!(json["speech_style"], "semi_formal");
        assert_eq!(json["tone"], "positive");
        assert_eq!(json["total_messages"], 4);
    }
}
