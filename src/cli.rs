use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Screenplay source file
    #[arg(default_value = "script.an")]
    pub input: PathBuf,
    /// Print the parsed document as JSON
    #[arg(long, conflicts_with = "tokens")]
    pub json: bool,
    /// Print the cleaned token stream as JSON instead of parsing
    #[arg(long)]
    pub tokens: bool,
    /// Write JSON output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
