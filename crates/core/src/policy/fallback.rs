//! Literal reply tables used when the generative oracle is unavailable.

use crate::domain::response::{CandidateSource, ResponseCandidate, Tier};
use crate::emotion::Sentiment;

pub const FALLBACK_CONFIDENCE: f64 = 0.8;

/// Phrases meaning the partner has stopped replying.
const NO_CONTACT_SIGNALS: [&str; 13] = [
    "연락이 없",
    "연락 없",
    "연락이 안",
    "답장이 없",
    "답장 없",
    "답이 없",
    "읽씹",
    "안읽씹",
    "잠수",
    "no reply",
    "not responding",
    "hasn't replied",
    "ghosted",
];

struct Template {
    message: &'static str,
    advice: &'static str,
}

/// One row per tier in `Tier::ALL` order: (matching bucket, other bucket).
type Table = [(Template, Template); 3];

// Keyed by (negative, non-negative) sentiment.
const REENGAGEMENT: Table = [
    (
        Template {
            message: "안녕! 괜찮아? 요즘 많이 바쁜 것 같아서 안부 물어봐",
            advice: "걱정하는 마음만 가볍게 전해 상대가 편할 때 답할 수 있게 해요.",
        },
        Template {
            message: "안녕! 요즘 잘 지내? 바쁜가 보네 ㅎㅎ",
            advice: "재촉하지 않고 가볍게 안부를 물어 부담을 줄여요.",
        },
    ),
    (
        Template {
            message: "안녕! 괜찮아? 연락이 없어서 조금 걱정됐어. 무슨 일 있으면 편하게 얘기해줘",
            advice: "걱정을 솔직하게 표현하되 답을 강요하지 않는 균형 잡힌 접근이에요.",
        },
        Template {
            message: "안녕! 요즘 어떻게 지내? 갑자기 생각나서 연락해봤어 😊",
            advice: "자연스럽게 생각났다는 표현으로 대화를 다시 열어요.",
        },
    ),
    (
        Template {
            message: "안녕! 괜찮아? 네 생각이 나서 연락했어. 힘든 일 있으면 내가 들어줄게, 시간 되면 통화할래?",
            advice: "곁에 있겠다는 마음을 적극적으로 보여 주지만 상대가 여유가 없다면 부담이 될 수 있어요.",
        },
        Template {
            message: "안녕! 보고 싶어서 연락했어 ㅎㅎ 이번 주에 시간 되면 얼굴 볼래?",
            advice: "솔직한 호감과 만남 제안으로 관계를 진전시키지만 답이 없을 가능성도 감안하세요.",
        },
    ),
];

// Keyed by (positive, non-positive) sentiment.
const GENERIC: Table = [
    (
        Template {
            message: "오 그렇구나! 듣기만 해도 기분 좋다 ㅎㅎ",
            advice: "상대의 좋은 기분에 가볍게 맞장구쳐 안전하게 분위기를 이어가요.",
        },
        Template {
            message: "아 그렇구나! 나도 그런 생각 해본 적 있어",
            advice: "무난하고 공감하는 답변으로 부담 없이 대화를 이어갈 수 있어요.",
        },
    ),
    (
        Template {
            message: "와 좋다! 나도 완전 관심 있어 ㅎㅎ 더 얘기해줘",
            advice: "좋은 분위기에 적당한 관심을 더해 대화를 한 단계 이어가요.",
        },
        Template {
            message: "오 재밌네! 나도 그런 거 좋아해 ㅎㅎ",
            advice: "관심을 보이면서도 부담스럽지 않은 답변이에요.",
        },
    ),
    (
        Template {
            message: "너무 좋다! 이번 주말에 같이 하러 갈래? 😊",
            advice: "좋은 분위기를 살려 바로 만남을 제안하는 적극적인 답변이에요. 거절 가능성도 염두에 두세요.",
        },
        Template {
            message: "우와 완전 내 스타일이야! 언제 같이 해볼까? 😊",
            advice: "적극적인 호감 표현으로 관계 발전 가능성이 높지만 상대가 부담을 느낄 수 있어요.",
        },
    ),
];

pub fn is_no_contact(situation: &str) -> bool {
    let normalized = situation.to_lowercase();
    NO_CONTACT_SIGNALS.iter().any(|signal| normalized.contains(signal))
}

/// Deterministic reply for `tier`; cannot fail.
pub fn fallback_candidate(tier: Tier, situation: &str, sentiment: Sentiment) -> ResponseCandidate {
    let row = tier_row(tier);
    let template = if is_no_contact(situation) {
        pick(&REENGAGEMENT[row], sentiment == Sentiment::Negative)
    } else {
        pick(&GENERIC[row], sentiment == Sentiment::Positive)
    };

    ResponseCandidate {
        tier,
        message: template.message.to_string(),
        explanation: template.advice.to_string(),
        risk_level: tier.nominal_risk_level(),
        confidence: FALLBACK_CONFIDENCE,
        source: CandidateSource::Fallback,
    }
}

fn tier_row(tier: Tier) -> usize {
    match tier {
        Tier::Safe => 0,
        Tier::Balanced => 1,
        Tier::Bold => 2,
    }
}

fn pick(row: &(Template, Template), first_bucket: bool) -> &Template {
    if first_bucket {
        &row.0
    } else {
        &row.1
    }
}
