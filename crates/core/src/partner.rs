//! Keyword-driven partner context extraction.
//!
//! Every table here is a static ordered slice scanned in a single pass so the
//! output order always follows declaration order.

use serde::{Deserialize, Serialize};

use crate::domain::partner::PartnerInfo;

pub const MAX_PERSONALITY_KEYWORDS: usize = 5;
pub const MAX_CONVERSATION_TOPICS: usize = 10;

struct TraitCategory {
    id: &'static str,
    label: &'static str,
    keywords: &'static [&'static str],
}

const PERSONALITY_TAXONOMY: [TraitCategory; 10] = [
    TraitCategory {
        id: "introverted",
        label: "내향적",
        keywords: &["내성적", "조용", "수줍", "소심", "introvert", "quiet", "shy", "timid"],
    },
    TraitCategory {
        id: "outgoing",
        label: "외향적",
        keywords: &["외향적", "활발", "사교적", "적극적", "extrovert", "outgoing", "sociable"],
    },
    TraitCategory {
        id: "emotional",
        label: "감성적",
        keywords: &["감성적", "감정적", "로맨틱", "섬세", "romantic", "sensitive"],
    },
    TraitCategory {
        id: "logical",
        label: "논리적",
        keywords: &["논리적", "이성적", "분석적", "체계적", "logical", "rational", "analytical"],
    },
    TraitCategory {
        id: "humorous",
        label: "유머러스",
        keywords: &["유머", "재미있", "웃긴", "장난", "개그", "humor", "funny", "witty"],
    },
    TraitCategory {
        id: "serious",
        label: "진지함",
        keywords: &["진지", "성실", "책임감", "신중", "serious", "sincere", "careful"],
    },
    TraitCategory {
        id: "independent",
        label: "독립적",
        keywords: &["독립적", "자립적", "개인주의", "independent", "self-reliant"],
    },
    TraitCategory {
        id: "caring",
        label: "배려심 깊음",
        keywords: &["배려", "친절", "따뜻", "상냥", "caring", "kind", "warm"],
    },
    TraitCategory {
        id: "perfectionist",
        label: "완벽주의",
        keywords: &["완벽", "꼼꼼", "세심", "철저", "perfectionist", "meticulous"],
    },
    TraitCategory {
        id: "free_spirited",
        label: "자유로운 성향",
        keywords: &["자유", "즉흥", "유연", "개방적", "모험", "spontaneous", "adventurous"],
    },
];

struct StyleAdvice {
    id: &'static str,
    aliases: &'static [&'static str],
    advice: &'static str,
}

const COMMUNICATION_ADVICE: [StyleAdvice; 6] = [
    StyleAdvice {
        id: "direct",
        aliases: &["직설적", "직접적"],
        advice: "돌려 말하지 말고 명확하고 솔직하게 의사를 표현하세요.",
    },
    StyleAdvice {
        id: "indirect",
        aliases: &["간접적"],
        advice: "부드럽게 돌려 말하고 상대가 스스로 답할 여지를 남겨 두세요.",
    },
    StyleAdvice {
        id: "humorous",
        aliases: &["유머러스", "유머"],
        advice: "가벼운 농담과 유쾌한 분위기로 대화를 이끌어 보세요.",
    },
    StyleAdvice {
        id: "serious",
        aliases: &["진지함", "진지"],
        advice: "의미 있는 주제로 깊이 있게, 진정성을 담아 대화하세요.",
    },
    StyleAdvice {
        id: "emotional",
        aliases: &["감정적"],
        advice: "감정을 솔직하게 나누고 상대의 마음에 먼저 공감해 주세요.",
    },
    StyleAdvice {
        id: "logical",
        aliases: &["논리적"],
        advice: "근거를 들어 차분하고 체계적으로 이야기하세요.",
    },
];

struct InterestTopics {
    keywords: &'static [&'static str],
    openers: [&'static str; 3],
}

const TOPIC_TAXONOMY: [InterestTopics; 10] = [
    InterestTopics {
        keywords: &["영화", "movie", "film"],
        openers: ["최근 본 영화", "좋아하는 장르", "영화관 vs 집에서 보기"],
    },
    InterestTopics {
        keywords: &["음악", "music"],
        openers: ["좋아하는 가수", "콘서트 경험", "음악 취향"],
    },
    InterestTopics {
        keywords: &["독서", "책", "book", "reading"],
        openers: ["최근 읽은 책", "좋아하는 작가", "독서 습관"],
    },
    InterestTopics {
        keywords: &["운동", "헬스", "exercise", "workout", "fitness"],
        openers: ["운동 종목", "헬스장 vs 야외운동", "운동 루틴"],
    },
    InterestTopics {
        keywords: &["여행", "travel"],
        openers: ["가고 싶은 곳", "여행 스타일", "여행 경험"],
    },
    InterestTopics {
        keywords: &["요리", "cooking"],
        openers: ["좋아하는 음식", "요리 실력", "맛집 탐방"],
    },
    InterestTopics {
        keywords: &["게임", "game"],
        openers: ["즐기는 게임", "게임 시간", "게임 취향"],
    },
    InterestTopics {
        keywords: &["드라마", "drama"],
        openers: ["최근 본 드라마", "좋아하는 장르", "드라마 추천"],
    },
    InterestTopics {
        keywords: &["카페", "커피", "cafe", "coffee"],
        openers: ["좋아하는 카페", "커피 vs 차", "카페 분위기"],
    },
    InterestTopics {
        keywords: &["쇼핑", "shopping"],
        openers: ["쇼핑 스타일", "좋아하는 브랜드", "온라인 vs 오프라인"],
    },
];

struct RelationshipStrategy {
    aliases: &'static [&'static str],
    strategy: &'static str,
    advice: [&'static str; 3],
}

const RELATIONSHIP_STRATEGIES: [RelationshipStrategy; 4] = [
    RelationshipStrategy {
        aliases: &["썸", "some", "crush"],
        strategy: "관심을 보이되 부담스럽지 않게, 공통 관심사를 통한 자연스러운 접근",
        advice: [
            "너무 적극적이지 말고 적당한 거리감 유지",
            "공통 관심사로 대화 시작",
            "상대방 반응 살피며 단계적 접근",
        ],
    },
    RelationshipStrategy {
        aliases: &["소개팅", "blind_date", "blind date"],
        strategy: "진정성 있는 관심 표현, 상대방을 알아가려는 자세",
        advice: [
            "첫인상이 중요하므로 정중하고 예의바른 태도",
            "상대방 이야기에 집중",
            "공통점 찾기 노력",
        ],
    },
    RelationshipStrategy {
        aliases: &["연인", "lover", "partner"],
        strategy: "깊은 소통과 감정 표현, 관계 발전을 위한 노력",
        advice: ["솔직한 감정 표현", "상대방 입장 이해하기", "함께하는 시간의 소중함 표현"],
    },
    RelationshipStrategy {
        aliases: &["친구", "friend"],
        strategy: "편안하고 자연스러운 소통, 우정을 바탕으로 한 접근",
        advice: ["편안한 분위기 조성", "서로의 관심사 공유", "부담 없는 만남 제안"],
    },
];

const RISK_KEYWORDS: [&str; 7] = ["바쁨", "스트레스", "피곤", "힘들", "우울", "예민", "까다로움"];

/// Derived, non-persisted view of a partner description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerContext {
    pub personality_keywords: Vec<String>,
    pub communication_advice: String,
    pub conversation_topics: Vec<String>,
    pub approach_strategy: String,
    pub relationship_advice: Vec<String>,
    pub risk_factors: Vec<String>,
    pub compatibility_score: f64,
}

impl PartnerContext {
    pub fn is_empty(&self) -> bool {
        self.personality_keywords.is_empty()
            && self.communication_advice.is_empty()
            && self.conversation_topics.is_empty()
            && self.approach_strategy.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct PartnerContextBuilder;

impl PartnerContextBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, partner: &PartnerInfo) -> PartnerContext {
        let description = normalized(partner.description.as_deref());
        let interests = normalized(partner.interests.as_deref());

        let personality_keywords = personality_keywords(&description);
        let risk_factors = risk_factors(&description);
        let (approach_strategy, relationship_advice) =
            relationship_strategy(partner.relationship.as_deref());

        let compatibility_score =
            compatibility_score(partner, personality_keywords.len(), risk_factors.len());

        PartnerContext {
            communication_advice: communication_advice(partner.communication_style.as_deref()),
            conversation_topics: conversation_topics(&interests),
            personality_keywords,
            approach_strategy,
            relationship_advice,
            risk_factors,
            compatibility_score,
        }
    }
}

pub fn build(partner: &PartnerInfo) -> PartnerContext {
    PartnerContextBuilder::new().build(partner)
}

pub fn personality_keywords(normalized_description: &str) -> Vec<String> {
    PERSONALITY_TAXONOMY
        .iter()
        .filter(|category| contains_any(normalized_description, category.keywords))
        .take(MAX_PERSONALITY_KEYWORDS)
        .map(|category| category.id.to_string())
        .collect()
}

/// Korean display label for a personality trait id; unknown ids pass through.
pub fn trait_label(id: &str) -> &str {
    PERSONALITY_TAXONOMY
        .iter()
        .find(|category| category.id == id)
        .map_or(id, |category| category.label)
}

pub fn communication_advice(style: Option<&str>) -> String {
    let Some(style) = style.map(|value| value.trim().to_lowercase()) else {
        return String::new();
    };

    COMMUNICATION_ADVICE
        .iter()
        .find(|entry| entry.id == style || entry.aliases.contains(&style.as_str()))
        .map(|entry| entry.advice.to_string())
        .unwrap_or_default()
}

pub fn conversation_topics(normalized_interests: &str) -> Vec<String> {
    TOPIC_TAXONOMY
        .iter()
        .filter(|topic| contains_any(normalized_interests, topic.keywords))
        .flat_map(|topic| topic.openers)
        .take(MAX_CONVERSATION_TOPICS)
        .map(str::to_string)
        .collect()
}

fn relationship_strategy(relationship: Option<&str>) -> (String, Vec<String>) {
    let relationship = relationship.map(|value| value.trim().to_lowercase()).unwrap_or_default();

    RELATIONSHIP_STRATEGIES
        .iter()
        .find(|entry| entry.aliases.contains(&relationship.as_str()))
        .map(|entry| {
            (entry.strategy.to_string(), entry.advice.iter().map(|line| line.to_string()).collect())
        })
        .unwrap_or_default()
}

fn risk_factors(normalized_description: &str) -> Vec<String> {
    RISK_KEYWORDS
        .iter()
        .filter(|keyword| normalized_description.contains(*keyword))
        .map(|keyword| format!("'{keyword}' 상태 - 신중한 접근 필요"))
        .collect()
}

fn compatibility_score(partner: &PartnerInfo, trait_count: usize, risk_count: usize) -> f64 {
    let mut score = 0.5;

    if trait_count >= 3 {
        score += 0.1;
    }

    // Raw comma-separated pieces, blanks included.
    let interest_count = partner.interests.as_deref().unwrap_or_default().split(',').count();
    if interest_count >= 3 {
        score += 0.1;
    }

    if partner.communication_style.as_deref().is_some_and(|style| !style.trim().is_empty()) {
        score += 0.1;
    }

    let description_length =
        partner.description.as_deref().map(|text| text.chars().count()).unwrap_or(0);
    if description_length > 100 {
        score += 0.1;
    } else if description_length > 50 {
        score += 0.05;
    }

    score -= risk_count as f64 * 0.05;
    score.clamp(0.0, 1.0)
}

fn normalized(value: Option<&str>) -> String {
    value.map(str::to_lowercase).unwrap_or_default()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
