use std::path::Path;

use serde::Serialize;
use wingman_core::risk::{RiskAssessment, RiskClassifier};
use wingman_core::style::{StyleAnalyzer, StyleProfile};

use crate::commands::{read_messages, CommandResult, EXIT_INPUT};

#[derive(Debug, Serialize)]
struct AnalysisReport {
    speech_profile: StyleProfile,
    risk: RiskAssessment,
}

pub fn run(file: &Path, json_output: bool) -> CommandResult {
    let messages = match read_messages(file) {
        Ok(messages) => messages,
        Err(message) => return CommandResult::failure("analyze", "input_read", message, EXIT_INPUT),
    };

    let speech_profile = StyleAnalyzer::new().analyze(&messages);
    let risk = RiskClassifier::new().classify(&speech_profile, None);

    if !json_output {
        return CommandResult { exit_code: 0, output: render_human(&speech_profile, &risk) };
    }

    let summary = format!(
        "analyzed {} messages: {} style, {} tier",
        speech_profile.total_messages,
        speech_profile.speech_style.as_str(),
        risk.tier
    );
    CommandResult::success_with("analyze", summary, Some(AnalysisReport { speech_profile, risk }))
}

fn render_human(profile: &StyleProfile, risk: &RiskAssessment) -> String {
    [
        format!("messages analyzed: {}", profile.total_messages),
        format!("- formal_ratio = {:.2}", profile.formal_ratio),
        format!("- emoji_ratio = {:.2}", profile.emoji_ratio),
        format!("- avg_length = {:.1}", profile.avg_length),
        format!("- speech_style = {}", profile.speech_style.as_str()),
        format!("- tone = {}", profile.tone.as_str()),
        format!("- risk_tolerance = {:.2}", risk.risk_tolerance),
        format!("- tier = {}", risk.tier),
    ]
    .join("\n")
}
