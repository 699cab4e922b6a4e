use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;
use wingman_core::emotion::{
    truncate_for_sentiment, EmotionAnalysis, SentimentReport, SENTIMENT_LANGUAGE,
};

/// Remote sentiment detection service.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    async fn detect(&self, text: &str, language: &str) -> Result<SentimentReport>;
}

#[derive(Clone, Default)]
pub struct EmotionAnalyzer {
    provider: Option<Arc<dyn SentimentProvider>>,
}

impl EmotionAnalyzer {
    pub fn new(provider: Arc<dyn SentimentProvider>) -> Self {
        Self { provider: Some(provider) }
    }

    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    /// Never fails; degrades to [`EmotionAnalysis::fallback`].
    pub async fn analyze(&self, text: &str) -> EmotionAnalysis {
        let Some(provider) = &self.provider else {
            return EmotionAnalysis::fallback();
        };

        match provider.detect(truncate_for_sentiment(text), SENTIMENT_LANGUAGE).await {
            Ok(report) => EmotionAnalysis::from_report(report),
            Err(error) => {
                warn!(
                    event_name = "emotion.analyze.provider_failed",
                    error = %error,
                    "sentiment provider failed"
                );
                EmotionAnalysis::fallback()
            }
        }
    }
}
