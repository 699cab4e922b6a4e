use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;
use toml::Value;
use wingman_core::config::{AppConfig, LoadOptions, LogFormat};

struct ConfigField {
    key: &'static str,
    env_keys: &'static [&'static str],
    value: String,
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in effective_fields(&config) {
        let source = field_source(
            field.key,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key, &field.value, source));
    }

    lines.join("\n")
}

fn effective_fields(config: &AppConfig) -> Vec<ConfigField> {
    let llm = &config.llm;
    let api_key = llm.api_key.as_ref().map(|key| redact_key(key.expose_secret()));
    let format = match config.logging.format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    };

    vec![
        field("llm.provider", &["WINGMAN_LLM_PROVIDER"], llm.provider.as_str()),
        field("llm.model", &["WINGMAN_LLM_MODEL"], &llm.model),
        field("llm.base_url", &["WINGMAN_LLM_BASE_URL"], llm.base_url.as_deref().unwrap_or("<unset>")),
        field("llm.api_key", &["WINGMAN_LLM_API_KEY"], api_key.as_deref().unwrap_or("<unset>")),
        field("llm.timeout_secs", &["WINGMAN_LLM_TIMEOUT_SECS"], &llm.timeout_secs.to_string()),
        field(
            "llm.max_output_tokens",
            &["WINGMAN_LLM_MAX_OUTPUT_TOKENS"],
            &llm.max_output_tokens.to_string(),
        ),
        field("server.bind_address", &["WINGMAN_SERVER_BIND_ADDRESS"], &config.server.bind_address),
        field("server.port", &["WINGMAN_SERVER_PORT"], &config.server.port.to_string()),
        field(
            "logging.level",
            &["WINGMAN_LOGGING_LEVEL", "WINGMAN_LOG_LEVEL"],
            &config.logging.level,
        ),
        field("logging.format", &["WINGMAN_LOGGING_FORMAT", "WINGMAN_LOG_FORMAT"], format),
    ]
}

fn field(key: &'static str, env_keys: &'static [&'static str], value: &str) -> ConfigField {
    ConfigField { key, env_keys, value: value.to_string() }
}

fn detect_config_path() -> Option<PathBuf> {
    ["wingman.toml", "config/wingman.toml"].into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

/// Keeps the vendor prefix (`sk-`, `sk-ant-`) and hides the rest.
fn redact_key(key: &str) -> String {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    match trimmed.rsplit_once('-') {
        Some((prefix, _)) => format!("{prefix}-***"),
        None => "<redacted>".to_string(),
    }
}
