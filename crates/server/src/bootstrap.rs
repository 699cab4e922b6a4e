use wingman_agent::{EmotionAnalyzer, ResponseGenerator};
use wingman_core::config::{AppConfig, ConfigError, LoadOptions};
use thiserror::Error;
use tracing::info;

use crate::state::AppState;

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("generative oracle setup failed: {0}")]
    Oracle(#[source] anyhow::Error),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    info!(event_name = "server.bootstrap.start", "starting application bootstrap");
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let generator = ResponseGenerator::from_config(&config.llm).map_err(BootstrapError::Oracle)?;
    info!(
        event_name = "server.bootstrap.oracle_configured",
        provider = config.llm.provider.as_str(),
        model = %config.llm.model,
        oracle_enabled = generator.has_oracle(),
        "reply generator initialized"
    );

    let state = AppState::in_memory(generator, EmotionAnalyzer::unconfigured());
    info!(
        event_name = "server.bootstrap.repositories_ready",
        backend = "memory",
        "repositories initialized"
    );

    Ok(Application { config, state })
}

#[cfg(test)]
mod tests {
    use wingman_core::config::{ConfigOverrides, LlmProvider, LoadOptions};

    use crate::bootstrap::bootstrap;

    #[tokio::test]
    async fn bootstrap_fails_fast_without_required_oracle_key() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                llm_provider: Some(LlmProvider::OpenAi),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await;

        let message = result.err().expect("error").to_string();
        assert!(message.contains("llm.api_key"));
    }

    #[tokio::test]
    async fn bootstrap_with_disabled_oracle_serves_fallbacks() {
        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                llm_provider: Some(LlmProvider::Disabled),
                server_port: Some(18_000),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await
        .expect("bootstrap should succeed without an oracle");

        assert_eq!(app.config.server.port, 18_000);
        assert!(!app.state.generator.has_oracle());
    }

    #[tokio::test]
    async fn bootstrap_builds_http_oracle_when_keyed() {
        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                llm_provider: Some(LlmProvider::Anthropic),
                llm_api_key: Some("sk-ant-test".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await
        .expect("bootstrap should succeed with a keyed provider");

        assert!(app.state.generator.has_oracle());
    }
}
