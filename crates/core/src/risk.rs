//! Style profile → risk tolerance → reply tier.

use serde::{Deserialize, Serialize};

use crate::domain::response::Tier;
use crate::emotion::EmotionSignal;
use crate::style::StyleProfile;

pub const BASE_RISK: f64 = 2.5;
pub const MIN_RISK: f64 = 1.0;
pub const MAX_RISK: f64 = 5.0;

/// At or below this the reply stays safe.
pub const SAFE_CEILING: f64 = 2.0;
/// At or above this the reply goes bold.
pub const BOLD_FLOOR: f64 = 3.5;

const EMOJI_BOOST: f64 = 0.5;
const CASUAL_BOOST: f64 = 0.5;
const SHORT_MESSAGE_BOOST: f64 = 0.3;
const EXPRESSIVE_TRAIT_BOOST: f64 = 0.4;

const EXPRESSIVE_TRAITS: [&str; 6] = ["expressive", "outgoing", "assertive", "표현력 풍부", "외향적", "적극적"];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_tolerance: f64,
    pub tier: Tier,
}

#[derive(Clone, Debug, Default)]
pub struct RiskClassifier;

impl RiskClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, profile: &StyleProfile, emotion: Option<&EmotionSignal>) -> RiskAssessment {
        let mut risk = BASE_RISK;

        if profile.emoji_ratio > 0.5 {
            risk += EMOJI_BOOST;
        }
        if profile.formal_ratio < 0.3 {
            risk += CASUAL_BOOST;
        }
        if profile.avg_length < 20.0 {
            risk += SHORT_MESSAGE_BOOST;
        }
        if emotion.is_some_and(has_expressive_trait) {
            risk += EXPRESSIVE_TRAIT_BOOST;
        }

        let risk_tolerance = risk.clamp(MIN_RISK, MAX_RISK);
        RiskAssessment { risk_tolerance, tier: tier_for(risk_tolerance) }
    }
}

/// Two-threshold step function; both boundaries belong to the outer tier.
pub fn tier_for(risk_tolerance: f64) -> Tier {
    if risk_tolerance <= SAFE_CEILING {
        Tier::Safe
    } else if risk_tolerance >= BOLD_FLOOR {
        Tier::Bold
    } else {
        Tier::Balanced
    }
}

pub fn classify(profile: &StyleProfile, emotion: Option<&EmotionSignal>) -> RiskAssessment {
    RiskClassifier::new().classify(profile, emotion)
}

fn has_expressive_trait(emotion: &EmotionSignal) -> bool {
    emotion.personality_traits.iter().any(|label| {
        let label = label.trim().to_lowercase();
        EXPRESSIVE_TRAITS.contains(&label.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::{classify, tier_for, MAX_RISK, MIN_RISK};
    use crate::domain::response::Tier;
    use crate::emotion::EmotionSignal;
    use crate::style::{analyze, SpeechStyle, StyleProfile, Tone};

    fn profile(formal_ratio: f64, emoji_ratio: f64, avg_length: f64) -> StyleProfile {
        StyleProfile {
            formal_ratio,
            emoji_ratio,
            avg_length,
            total_messages: 10,
            tone: Tone::Neutral,
            speech_style: SpeechStyle::from_formal_ratio(formal_ratio),
        }
    }

    #[test]
    fn formal_long_history_stays_at_base() {
        let assessment = classify(&profile(0.9, 0.1, 40.0), None);

        assert_eq!(assessment.risk_tolerance, 2.5);
        assert_eq!(assessment.tier, Tier::Balanced);
    }

    #[test]
    fn casual_expressive_history_goes_bold() {
        let emotion = EmotionSignal::default().with_traits(["Outgoing"]);
        let assessment = classify(&profile(0.1, 1.2, 12.0), Some(&emotion));

        assert!((assessment.risk_tolerance - 4.2).abs() < 1e-9);
        assert_eq!(assessment.tier, Tier::Bold);
    }

    #[test]
    fn emoji_and_casual_boosts_reach_bold_boundary() {
        let assessment = classify(&profile(0.2, 0.8, 30.0), None);

        assert_eq!(assessment.risk_tolerance, 3.5);
        assert_eq!(assessment.tier, Tier::Bold);
    }

    #[test]
    fn crossing_emoji_threshold_never_lowers_risk() {
        for formal_ratio in [0.0, 0.29, 0.3, 0.8, 1.0] {
            for avg_length in [5.0, 19.9, 20.0, 80.0] {
                let low = classify(&profile(formal_ratio, 0.5, avg_length), None);
                let high = classify(&profile(formal_ratio, 0.51, avg_length), None);
                assert!(high.risk_tolerance >= low.risk_tolerance);
            }
        }
    }

    #[test]
    fn risk_is_always_clamped_to_range() {
        let emotion = EmotionSignal::default().with_traits(["assertive", "expressive"]);
        for formal_ratio in [0.0, 0.5, 1.0] {
            for emoji_ratio in [0.0, 0.6, 3.0] {
                for avg_length in [0.0, 15.0, 200.0] {
                    let risk = classify(&profile(formal_ratio, emoji_ratio, avg_length), Some(&emotion))
                        .risk_tolerance;
                    assert!((MIN_RISK..=MAX_RISK).contains(&risk));
                }
            }
        }
    }

    #[test]
    fn korean_trait_labels_count_as_expressive() {
        let emotion = EmotionSignal::default().with_traits(["친근함", "표현력 풍부"]);
        let assessment = classify(&profile(0.9, 0.0, 40.0), Some(&emotion));

        assert!((assessment.risk_tolerance - 2.9).abs() < 1e-9);
    }

    #[test]
    fn unrelated_traits_do_not_boost() {
        let emotion = EmotionSignal::default().with_traits(["calm", "introverted"]);
        let assessment = classify(&profile(0.9, 0.0, 40.0), Some(&emotion));

        assert_eq!(assessment.risk_tolerance, 2.5);
    }

    #[test]
    fn tier_mapping_is_a_step_function() {
        assert_eq!(tier_for(1.0), Tier::Safe);
        assert_eq!(tier_for(1.5), Tier::Safe);
        assert_eq!(tier_for(2.5), Tier::Balanced);
        assert_eq!(tier_for(4.0), Tier::Bold);
        assert_eq!(tier_for(5.0), Tier::Bold);
    }

    #[test]
    fn tier_boundaries_belong_to_outer_tiers() {
        assert_eq!(tier_for(2.0), Tier::Safe);
        assert_eq!(tier_for(2.0001), Tier::Balanced);
        assert_eq!(tier_for(3.4999), Tier::Balanced);
        assert_eq!(tier_for(3.5), Tier::Bold);
    }

    #[test]
    fn short_formal_history_is_balanced() {
        let assessment = classify(&analyze(&["요즘 바빠요?", "넵 맞아요"]), None);

        assert!((assessment.risk_tolerance - 2.8).abs() < 1e-9);
        assert_eq!(assessment.tier, Tier::Balanced);
    }

    #[test]
    fn empty_history_default_profile_is_balanced() {
        let assessment = classify(&analyze::<&str>(&[]), None);

        assert!((assessment.risk_tolerance - 2.8).abs() < 1e-9);
        assert_eq!(assessment.tier, Tier::Balanced);
    }
}
