use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use wingman_core::config::{LlmConfig, LlmProvider};

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OLLAMA_BASE_URL: &str = "http://localhost:11434";
const TEMPERATURE: f32 = 0.8;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str, max_output_tokens: u32) -> Result<String>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endpoint {
    OpenAiChat,
    AnthropicMessages,
    OllamaGenerate,
}

/// Single-prompt client for the hosted chat APIs and a local Ollama.
#[derive(Clone)]
pub struct HttpLlmClient {
    client: Client,
    endpoint: Endpoint,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
}

impl std::fmt::Debug for HttpLlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLlmClient")
            .field("endpoint", &self.endpoint)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl HttpLlmClient {
    /// Returns `None` when the provider is disabled.
    pub fn from_config(llm: &LlmConfig) -> Result<Option<Self>> {
        let (endpoint, default_base_url) = match llm.provider {
            LlmProvider::OpenAi => (Endpoint::OpenAiChat, OPENAI_BASE_URL),
            LlmProvider::Anthropic => (Endpoint::AnthropicMessages, ANTHROPIC_BASE_URL),
            LlmProvider::Ollama => (Endpoint::OllamaGenerate, OLLAMA_BASE_URL),
            LlmProvider::Disabled => return Ok(None),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(llm.timeout_secs))
            .build()
            .context("failed to build http client for llm provider")?;

        let base_url = llm
            .base_url
            .as_deref()
            .unwrap_or(default_base_url)
            .trim_end_matches('/')
            .to_string();

        Ok(Some(Self {
            client,
            endpoint,
            base_url,
            model: llm.model.clone(),
            api_key: llm.api_key.clone(),
        }))
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .ok_or_else(|| anyhow!("llm api key is not configured"))
    }

    async fn complete_openai(&self, prompt: &str, max_output_tokens: u32) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            max_tokens: max_output_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(self.api_key()?)
            .json(&request)
            .send()
            .await
            .context("openai request failed")?;
        let body: ChatResponse = read_success(response, "openai").await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("openai response contained no message content"))
    }

    async fn complete_anthropic(&self, prompt: &str, max_output_tokens: u32) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: max_output_tokens,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.api_key()?)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .context("anthropic request failed")?;
        let body: MessagesResponse = read_success(response, "anthropic").await?;

        body.content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .find_map(|block| block.text)
            .ok_or_else(|| anyhow!("anthropic response contained no text block"))
    }

    async fn complete_ollama(&self, prompt: &str, max_output_tokens: u32) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions { num_predict: max_output_tokens, temperature: TEMPERATURE },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .context("ollama request failed")?;
        let body: GenerateResponse = read_success(response, "ollama").await?;

        Ok(body.response)
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, prompt: &str, max_output_tokens: u32) -> Result<String> {
        match self.endpoint {
            Endpoint::OpenAiChat => self.complete_openai(prompt, max_output_tokens).await,
            Endpoint::AnthropicMessages => self.complete_anthropic(prompt, max_output_tokens).await,
            Endpoint::OllamaGenerate => self.complete_ollama(prompt, max_output_tokens).await,
        }
    }
}

async fn read_success<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
    provider: &str,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("{provider} api error ({status}): {body}");
    }
    response.json::<T>().await.with_context(|| format!("{provider} response was not valid json"))
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use wingman_core::config::{AppConfig, LlmProvider};

    use super::{Endpoint, HttpLlmClient};

    #[test]
    fn disabled_provider_builds_no_client() {
        let config = AppConfig::default();
        assert_eq!(config.llm.provider, LlmProvider::Disabled);

        let client = HttpLlmClient::from_config(&config.llm).expect("client config");
        assert!(client.is_none());
    }

    #[test]
    fn base_url_defaults_per_provider_and_trims_slash() {
        let mut config = AppConfig::default();
        config.llm.provider = LlmProvider::Ollama;
        config.llm.base_url = Some("http://gpu-box:11434/".to_string());

        let client = HttpLlmClient::from_config(&config.llm)
            .expect("client config")
            .expect("ollama client");
        assert_eq!(client.endpoint, Endpoint::OllamaGenerate);
        assert_eq!(client.base_url, "http://gpu-box:11434");

        config.llm.provider = LlmProvider::Anthropic;
        config.llm.base_url = None;
        let client = HttpLlmClient::from_config(&config.llm)
            .expect("client config")
            .expect("anthropic client");
        assert_eq!(client.base_url, "https://api.anthropic.com");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let mut config = AppConfig::default();
        config.llm.provider = LlmProvider::OpenAi;
        config.llm.api_key = Some("sk-very-secret".to_string().into());

        let client =
            HttpLlmClient::from_config(&config.llm).expect("client config").expect("openai client");
        assert!(!format!("{client:?}").contains("sk-very-secret"));
    }
}
