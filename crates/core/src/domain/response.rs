use serde::{Deserialize, Serialize};

/// Discrete social-risk category of a reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Safe,
    Balanced,
    Bold,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Safe, Tier::Balanced, Tier::Bold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Balanced => "balanced",
            Self::Bold => "bold",
        }
    }

    pub fn korean_label(&self) -> &'static str {
        match self {
            Self::Safe => "안전형",
            Self::Balanced => "표준형",
            Self::Bold => "대담형",
        }
    }

    /// Risk level reported on candidates of this tier when none is given.
    pub fn nominal_risk_level(&self) -> u8 {
        match self {
            Self::Safe => 1,
            Self::Balanced => 3,
            Self::Bold => 5,
        }
    }

    /// Risk levels a candidate of this tier may report. Neighbouring bands share one level.
    pub fn risk_band(&self) -> std::ops::RangeInclusive<u8> {
        match self {
            Self::Safe => 1..=2,
            Self::Balanced => 2..=4,
            Self::Bold => 4..=5,
        }
    }

    /// Accepts English ids and the Korean labels used in prompts.
    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "safe" | "안전형" | "안전" => Some(Self::Safe),
            "balanced" | "standard" | "표준형" | "표준" => Some(Self::Balanced),
            "bold" | "대담형" | "대담" => Some(Self::Bold),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_label(value)
            .ok_or_else(|| format!("unsupported tier `{value}` (expected safe|balanced|bold)"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Oracle,
    Fallback,
}

/// A copy-ready reply suggestion. Built once per request and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseCandidate {
    #[serde(rename = "type")]
    pub tier: Tier,
    pub message: String,
    #[serde(alias = "advice")]
    pub explanation: String,
    pub risk_level: u8,
    pub confidence: f64,
    #[serde(default = "default_source")]
    pub source: CandidateSource,
}

fn default_source() -> CandidateSource {
    CandidateSource::Oracle
}
