pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "wingman",
    about = "Wingman operator CLI",
    long_about = "Analyze chat history, preview reply suggestions, and inspect runtime configuration.",
    after_help = "Examples:\n  wingman analyze --file chat.txt --json\n  wingman suggest --file chat.txt --situation \"연락이 없어\"\n  wingman doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Profile speech style and risk tier of a message history file")]
    Analyze {
        #[arg(long, help = "Message history, one message per line")]
        file: PathBuf,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Generate one reply suggestion for the computed risk tier")]
    Suggest {
        #[arg(long, help = "Message history, one message per line")]
        file: PathBuf,
        #[arg(long, help = "Current situation in free text")]
        situation: String,
        #[arg(long, default_value = "", help = "Recent conversation context")]
        context: String,
        #[arg(long, help = "Sentiment hint: positive|negative|neutral|mixed")]
        sentiment: Option<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, oracle readiness, and the fallback reply path")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Analyze { file, json } => commands::analyze::run(&file, json),
        Command::Suggest { file, situation, context, sentiment } => {
            commands::suggest::run(commands::suggest::SuggestArgs {
                file,
                situation,
                context,
                sentiment,
            })
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
