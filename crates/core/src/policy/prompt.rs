use std::fmt::{self, Write};

use super::ResponseRequest;
use crate::domain::response::Tier;
use crate::partner::{trait_label, PartnerContext};
use crate::style::StyleProfile;

const NOT_PROVIDED: &str = "(없음)";

fn tier_guidance(tier: Tier) -> &'static str {
    match tier {
        Tier::Safe => "상대에게 부담을 주지 않는 무난하고 공감 위주의 답변",
        Tier::Balanced => "관심을 표현하되 지나치지 않은 자연스러운 답변",
        Tier::Bold => "호감을 적극적으로 드러내거나 만남을 제안하는 답변",
    }
}

/// Korean instruction asking the oracle for a single JSON reply object.
pub fn build_prompt(request: &ResponseRequest) -> String {
    let mut prompt = String::new();
    // Writing into a String cannot fail.
    let _ = write_prompt(&mut prompt, request);
    prompt
}

fn write_prompt(out: &mut String, request: &ResponseRequest) -> fmt::Result {
    out.push_str("당신은 메신저 대화를 도와주는 연애 코치입니다.\n");
    out.push_str("아래 정보를 바탕으로 사용자가 바로 보낼 수 있는 답장 하나를 작성하세요.\n\n");

    writeln!(out, "[대화 맥락]\n{}\n", or_placeholder(&request.context_text))?;
    writeln!(out, "[현재 상황]\n{}\n", or_placeholder(&request.situation))?;
    write_style(out, &request.style)?;
    if let Some(partner) = &request.partner {
        write_partner(out, partner)?;
    }

    let tier = request.tier;
    writeln!(
        out,
        "[답변 유형]\n{} ({}): {}\n",
        tier.korean_label(),
        tier.as_str(),
        tier_guidance(tier)
    )?;

    out.push_str("사용자의 말투를 그대로 따라 하고, 설명 없이 아래 형식의 JSON 객체 하나만 출력하세요.\n");
    write!(
        out,
        "{{\"type\": \"{}\", \"message\": \"보낼 메시지\", \"explanation\": \"이 답변을 추천하는 이유\", \"risk_level\": {}, \"confidence\": 0.0~1.0}}",
        tier.korean_label(),
        tier.nominal_risk_level()
    )
}

fn write_style(out: &mut String, style: &StyleProfile) -> fmt::Result {
    writeln!(out, "[사용자 말투]")?;
    writeln!(out, "- 존댓말 비율: {:.0}%", style.formal_ratio * 100.0)?;
    writeln!(out, "- 메시지당 이모티콘: {:.1}개", style.emoji_ratio)?;
    writeln!(out, "- 평균 길이: {:.0}자", style.avg_length)?;
    writeln!(out, "- 어조: {}", style.tone.korean_label())?;
    writeln!(out, "- 말투: {}\n", style.speech_style.korean_label())
}

fn write_partner(out: &mut String, partner: &PartnerContext) -> fmt::Result {
    writeln!(out, "[상대방 정보]")?;
    if !partner.personality_keywords.is_empty() {
        let traits = partner
            .personality_keywords
            .iter()
            .map(|id| trait_label(id))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "- 성격: {traits}")?;
    }
    if !partner.communication_advice.is_empty() {
        writeln!(out, "- 소통 방식: {}", partner.communication_advice)?;
    }
    if !partner.conversation_topics.is_empty() {
        writeln!(out, "- 추천 화제: {}", partner.conversation_topics.join(" / "))?;
    }
    if !partner.approach_strategy.is_empty() {
        writeln!(out, "- 접근 전략: {}", partner.approach_strategy)?;
    }
    if !partner.risk_factors.is_empty() {
        writeln!(out, "- 주의할 점: {}", partner.risk_factors.join(" "))?;
    }
    writeln!(out)
}

fn or_placeholder(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        NOT_PROVIDED
    } else {
        trimmed
    }
}
