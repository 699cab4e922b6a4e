use std::path::PathBuf;

use wingman_agent::{ResponseGenerator, SuggestionInput};
use wingman_core::config::{AppConfig, LoadOptions};
use wingman_core::emotion::{EmotionSignal, Sentiment};

use crate::commands::{read_messages, CommandResult, EXIT_CONFIG, EXIT_INPUT, EXIT_RUNTIME};

#[derive(Debug, Clone, Default)]
pub struct SuggestArgs {
    pub file: PathBuf,
    pub situation: String,
    pub context: String,
    pub sentiment: Option<String>,
}

pub fn run(args: SuggestArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "suggest",
                "config_validation",
                error.to_string(),
                EXIT_CONFIG,
            )
        }
    };

    let generator = match ResponseGenerator::from_config(&config.llm) {
        Ok(generator) => generator,
        Err(error) => {
            return CommandResult::failure(
                "suggest",
                "oracle_setup",
                format!("{error:#}"),
                EXIT_RUNTIME,
            )
        }
    };

    run_with_generator(&generator, args)
}

/// Same as [`run`] with an already-built generator.
pub fn run_with_generator(generator: &ResponseGenerator, args: SuggestArgs) -> CommandResult {
    let messages = match read_messages(&args.file) {
        Ok(messages) => messages,
        Err(message) => return CommandResult::failure("suggest", "input_read", message, EXIT_INPUT),
    };

    let emotion = match args.sentiment.as_deref().map(str::parse::<Sentiment>) {
        None => EmotionSignal::default(),
        Some(Ok(sentiment)) => EmotionSignal::with_sentiment(sentiment),
        Some(Err(message)) => {
            return CommandResult::failure("suggest", "invalid_argument", message, EXIT_INPUT)
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "suggest",
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                EXIT_RUNTIME,
            )
        }
    };

    let suggestion = runtime.block_on(generator.suggest(SuggestionInput {
        messages,
        situation: args.situation,
        context_text: args.context,
        partner: None,
        emotion,
    }));

    let summary = format!(
        "{} reply suggested for {} tier",
        suggestion.responses.len(),
        suggestion.risk.tier
    );
    CommandResult::success_with("suggest", summary, Some(suggestion))
}
