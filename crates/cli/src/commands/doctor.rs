use serde::Serialize;
use wingman_agent::{HttpLlmClient, ResponseGenerator, SuggestionInput};
use wingman_core::config::{AppConfig, LlmProvider, LoadOptions};
use wingman_core::domain::response::CandidateSource;

use crate::commands::{CommandResult, EXIT_CONFIG};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { EXIT_CONFIG };

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
        return CommandResult { exit_code, output };
    }

    CommandResult { exit_code, output: render_human(&report) }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_oracle_readiness(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "oracle_readiness",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }
    checks.push(check_fallback_path());

    let failed = checks.iter().any(|check| check.status == CheckStatus::Fail);
    let overall_status = if failed { CheckStatus::Fail } else { CheckStatus::Pass };
    let summary = if failed {
        "doctor: one or more readiness checks failed".to_string()
    } else {
        "doctor: all readiness checks passed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_oracle_readiness(config: &AppConfig) -> DoctorCheck {
    if config.llm.provider == LlmProvider::Disabled {
        return DoctorCheck {
            name: "oracle_readiness",
            status: CheckStatus::Pass,
            details: "oracle disabled; replies come from fallback tables".to_string(),
        };
    }

    match HttpLlmClient::from_config(&config.llm) {
        Ok(_) => DoctorCheck {
            name: "oracle_readiness",
            status: CheckStatus::Pass,
            details: format!(
                "{} client ready for model `{}`",
                config.llm.provider.as_str(),
                config.llm.model
            ),
        },
        Err(error) => DoctorCheck {
            name: "oracle_readiness",
            status: CheckStatus::Fail,
            details: format!("{error:#}"),
        },
    }
}

/// The fallback path must answer even when nothing external is reachable.
fn check_fallback_path() -> DoctorCheck {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return DoctorCheck {
                name: "fallback_replies",
                status: CheckStatus::Fail,
                details: format!("failed to initialize async runtime: {error}"),
            };
        }
    };

    let suggestion = runtime.block_on(ResponseGenerator::fallback_only().suggest(SuggestionInput {
        messages: vec!["오늘 뭐 해?".to_string()],
        situation: "상대방이 연락이 없어".to_string(),
        ..SuggestionInput::default()
    }));

    match suggestion.responses.as_slice() {
        [candidate] if candidate.source == CandidateSource::Fallback => DoctorCheck {
            name: "fallback_replies",
            status: CheckStatus::Pass,
            details: format!("fallback reply produced for {} tier", candidate.tier),
        },
        other => DoctorCheck {
            name: "fallback_replies",
            status: CheckStatus::Fail,
            details: format!("expected one fallback candidate, got {}", other.len()),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
