use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::response::{CandidateSource, ResponseCandidate, Tier};

pub const ORACLE_DEFAULT_CONFIDENCE: f64 = 0.9;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum OracleReplyError {
    #[error("oracle reply contains no JSON object")]
    NotJson,
    #[error("oracle reply has no response object")]
    MissingObject,
    #[error("oracle reply has no message")]
    MissingMessage,
    #[error("risk_level `{0}` is outside 1..=5")]
    RiskLevelOutOfRange(String),
    #[error("confidence `{0}` is outside [0, 1]")]
    ConfidenceOutOfRange(String),
    #[error("reply is labelled `{found}` but `{requested}` was requested")]
    TierMismatch { requested: Tier, found: Tier },
    #[error("risk_level {level} does not fit the `{tier}` tier")]
    RiskLevelOutsideTier { tier: Tier, level: u8 },
}

/// Validates untrusted oracle text into a candidate for `requested`.
///
/// The tier is never taken from the reply: a label naming another tier, or a
/// risk level outside the requested tier's band, rejects the reply.
pub fn parse_oracle_reply(raw: &str, requested: Tier) -> Result<ResponseCandidate, OracleReplyError> {
    let body = extract_json_object(raw).ok_or(OracleReplyError::NotJson)?;
    let value: Value = serde_json::from_str(body).map_err(|_| OracleReplyError::NotJson)?;
    let object = unwrap_response(&value).ok_or(OracleReplyError::MissingObject)?;

    let message = object
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .ok_or(OracleReplyError::MissingMessage)?;

    let tier = requested;
    if let Some(found) = object.get("type").and_then(Value::as_str).and_then(Tier::parse_label) {
        if found != requested {
            return Err(OracleReplyError::TierMismatch { requested, found });
        }
    }

    let explanation = object
        .get("explanation")
        .or_else(|| object.get("advice"))
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();

    let risk_level = match object.get("risk_level") {
        None | Some(Value::Null) => tier.nominal_risk_level(),
        Some(raw_level) => parse_risk_level(raw_level)?,
    };
    if !tier.risk_band().contains(&risk_level) {
        return Err(OracleReplyError::RiskLevelOutsideTier { tier, level: risk_level });
    }

    let confidence = match object.get("confidence") {
        None | Some(Value::Null) => ORACLE_DEFAULT_CONFIDENCE,
        Some(raw_confidence) => parse_confidence(raw_confidence)?,
    };

    Ok(ResponseCandidate {
        tier,
        message: message.to_string(),
        explanation: explanation.to_string(),
        risk_level,
        confidence,
        source: CandidateSource::Oracle,
    })
}

fn extract_json_object(raw: &str) -> Option<&str> {
    let text = strip_code_fence(raw.trim());
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn strip_code_fence(text: &str) -> &str {
    let Some(open) = text.find("```") else {
        return text;
    };
    let after_open = &text[open + 3..];
    // Skip the language tag line, if any.
    let body = match after_open.find('\n') {
        Some(newline) => &after_open[newline + 1..],
        None => after_open,
    };
    match body.find("```") {
        Some(close) => &body[..close],
        None => body,
    }
}

fn unwrap_response(value: &Value) -> Option<&Map<String, Value>> {
    let object = value.as_object()?;
    if let Some(responses) = object.get("responses") {
        return responses.as_array()?.first()?.as_object();
    }
    if let Some(response) = object.get("response") {
        return response.as_object();
    }
    Some(object)
}

fn parse_risk_level(value: &Value) -> Result<u8, OracleReplyError> {
    let out_of_range = || OracleReplyError::RiskLevelOutOfRange(value.to_string());
    let level = value
        .as_i64()
        .or_else(|| value.as_f64().filter(|level| level.fract() == 0.0).map(|level| level as i64))
        .ok_or_else(out_of_range)?;

    if (1..=5).contains(&level) {
        u8::try_from(level).map_err(|_| out_of_range())
    } else {
        Err(out_of_range())
    }
}

fn parse_confidence(value: &Value) -> Result<f64, OracleReplyError> {
    value
        .as_f64()
        .filter(|confidence| (0.0..=1.0).contains(confidence))
        .ok_or_else(|| OracleReplyError::ConfidenceOutOfRange(value.to_string()))
}
