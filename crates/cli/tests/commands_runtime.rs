use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use tempfile::TempDir;
use wingman_cli::commands::{analyze, config, doctor, suggest};

#[test]
fn analyze_json_reports_profile_and_tier() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_history(&dir, &["밥 먹었어요?"]);

    let result = analyze::run(&file, true);
    assert_eq!(result.exit_code, 0, "expected successful analysis");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "analyze");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["data"]["speech_profile"]["formal_ratio"], 1.0);
    assert_eq!(payload["data"]["speech_profile"]["speech_style"], "formal");
    assert_eq!(payload["data"]["risk"]["tier"], "balanced");
}

#[test]
fn analyze_human_output_lists_tier() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_history(&dir, &["밥 먹었어요?", "", "네 좋아요"]);

    let result = analyze::run(&file, false);
    assert_eq!(result.exit_code, 0);
    assert!(result.output.starts_with("messages analyzed: 2"));
    assert!(result.output.contains("- tier = balanced"));
}

#[test]
fn analyze_reports_missing_file_as_input_error() {
    let result = analyze::run(Path::new("does/not/exist.txt"), true);
    assert_eq!(result.exit_code, 3);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "input_read");
}

#[test]
fn suggest_falls_back_to_reengagement_reply_without_oracle() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_history(&dir, &["요즘 바빠요?", "넵 맞아요"]);

    with_env(&[("WINGMAN_LLM_PROVIDER", "disabled")], || {
        let result = suggest::run(suggest::SuggestArgs {
            file: file.clone(),
            situation: "상대방이 연락이 없어".to_string(),
            context: String::new(),
            sentiment: Some("negative".to_string()),
        });
        assert_eq!(result.exit_code, 0, "expected fallback suggestion: {}", result.output);

        let payload = parse_payload(&result.output);
        let responses = payload["data"]["responses"].as_array().expect("responses");
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["source"], "fallback");
        assert!(responses[0]["message"].as_str().is_some_and(|m| m.starts_with("안녕! 괜찮아?")));
        assert_eq!(payload["data"]["risk"]["tier"], responses[0]["type"]);
    });
}

#[test]
fn suggest_rejects_unknown_sentiment() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_history(&dir, &["뭐해?"]);

    with_env(&[], || {
        let result = suggest::run(suggest::SuggestArgs {
            file: file.clone(),
            situation: "주말 약속".to_string(),
            sentiment: Some("ecstatic".to_string()),
            ..suggest::SuggestArgs::default()
        });
        assert_eq!(result.exit_code, 3);
        assert_eq!(parse_payload(&result.output)["error_class"], "invalid_argument");
    });
}

#[test]
fn suggest_returns_config_failure_without_api_key() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_history(&dir, &["뭐해?"]);

    with_env(&[("WINGMAN_LLM_PROVIDER", "openai")], || {
        let result = suggest::run(suggest::SuggestArgs {
            file: file.clone(),
            ..suggest::SuggestArgs::default()
        });
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "suggest");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn doctor_passes_with_default_config() {
    with_env(&[], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "pass");
        let checks = payload["checks"].as_array().expect("checks");
        let names: Vec<&str> = checks.iter().filter_map(|check| check["name"].as_str()).collect();
        assert_eq!(names, vec!["config_validation", "oracle_readiness", "fallback_replies"]);
        assert!(checks.iter().all(|check| check["status"] == "pass"));
    });
}

#[test]
fn doctor_fails_and_skips_oracle_when_config_invalid() {
    with_env(&[("WINGMAN_LLM_PROVIDER", "anthropic")], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][0]["status"], "fail");
        assert_eq!(payload["checks"][1]["status"], "skipped");
        assert_eq!(payload["checks"][2]["status"], "pass");
    });
}

#[test]
fn config_redacts_api_key_and_attributes_env_source() {
    with_env(
        &[("WINGMAN_LLM_PROVIDER", "openai"), ("WINGMAN_LLM_API_KEY", "sk-live-abcdef123")],
        || {
            let output = config::run();

            assert!(output.contains(
                "- llm.api_key = sk-live-*** (source: env (WINGMAN_LLM_API_KEY))"
            ));
            assert!(output.contains("- llm.provider = openai (source: env (WINGMAN_LLM_PROVIDER))"));
            assert!(output.contains("- server.port = 8000 (source: default)"));
            assert!(!output.contains("abcdef123"));
        },
    );
}

fn write_history(dir: &TempDir, lines: &[&str]) -> PathBuf {
    let path = dir.path().join("history.txt");
    fs::write(&path, lines.join("\n")).expect("write history");
    path
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "WINGMAN_LLM_PROVIDER",
        "WINGMAN_LLM_API_KEY",
        "WINGMAN_LLM_BASE_URL",
        "WINGMAN_LLM_MODEL",
        "WINGMAN_LLM_TIMEOUT_SECS",
        "WINGMAN_LLM_MAX_OUTPUT_TOKENS",
        "WINGMAN_SERVER_BIND_ADDRESS",
        "WINGMAN_SERVER_PORT",
        "WINGMAN_LOGGING_LEVEL",
        "WINGMAN_LOGGING_FORMAT",
        "WINGMAN_LOG_LEVEL",
        "WINGMAN_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
