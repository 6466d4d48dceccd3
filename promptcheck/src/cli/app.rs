use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "promptcheck",
    version,
    about = "Promptcheck - Extract measurable constraints from prompts",
    long_about = "Promptcheck reads a prompt and extracts the word-count, budget, percentage and timeframe constraints it states, as JSON records a scorer can check model responses against."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract constraints from a prompt
    #[command(about = "Extract constraints from prompt text, a file, or stdin")]
    Extract(ExtractArgs),

    /// Run extraction on the built-in sample prompt
    #[command(about = "Extract constraints from a built-in sample prompt")]
    Demo(DemoArgs),

    /// Show or initialize settings
    #[command(about = "Show the effective settings or write the default config file")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Prompt text; read from --file or stdin when omitted
    #[arg(help = "Prompt text to extract constraints from", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the prompt from a file
    #[arg(short, long, help = "Read the prompt from a file")]
    pub file: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,
}

#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Pretty-print the JSON output
    #[arg(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Write the default settings to the config path
    #[arg(long, help = "Write the default settings file (at --config or .promptcheck/config.toml)")]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init", help = "Overwrite an existing settings file")]
    pub force: bool,
}
