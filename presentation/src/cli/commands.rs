//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use troupe_domain::AgentId;

/// Output format for the merged timeline
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing with per-agent attribution
    Full,
    /// JSON array of comment records
    Json,
    /// Niconico-style XML comment document
    Xml,
}

/// CLI arguments for danmaku-troupe
#[derive(Parser, Debug)]
#[command(name = "danmaku-troupe")]
#[command(author, version, about = "Persona agents generate a danmaku comment timeline for a video")]
#[command(long_about = r#"
danmaku-troupe runs a troupe of persona agents against a video. Each agent
calls the Gemini API in turn, reading the comments the agents before it
produced, and the results merge into one chronologically sorted timeline.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./troupe.toml       Project-level config
3. ~/.config/danmaku-troupe/config.toml   Global config

Example:
  danmaku-troupe stream.mp4
  danmaku-troupe stream.mp4 --article notes.txt --model gemini-2.5-pro
  danmaku-troupe stream.mp4 --order otaku,gal,professor --count professor=50
"#)]
pub struct Cli {
    /// Path to the video file to comment on
    pub video: PathBuf,

    /// Path to an article file embedded as supplementary context
    #[arg(short, long, value_name = "PATH")]
    pub article: Option<PathBuf>,

    /// Generation model identifier
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Execution order as comma-separated agent ids
    #[arg(long, value_name = "IDS")]
    pub order: Option<String>,

    /// Per-agent target comment count override, as <agent>=<count>
    #[arg(long, value_name = "AGENT=COUNT")]
    pub count: Vec<String>,

    /// Skip attaching the video binary; the model sees only the file name
    #[arg(long)]
    pub no_upload: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}

impl Cli {
    /// Parse the `--order` value into agent ids.
    pub fn parse_order(&self) -> Result<Option<Vec<AgentId>>, String> {
        let Some(order) = &self.order else {
            return Ok(None);
        };
        order
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<AgentId>().map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Parse `--count agent=n` overrides.
    pub fn parse_counts(&self) -> Result<Vec<(AgentId, u32)>, String> {
        self.count
            .iter()
            .map(|spec| {
                let (agent, count) = spec
                    .split_once('=')
                    .ok_or_else(|| format!("expected <agent>=<count>, got '{spec}'"))?;
                let agent: AgentId = agent.trim().parse().map_err(|e: troupe_domain::DomainError| e.to_string())?;
                let count: u32 = count
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid count in '{spec}'"))?;
                Ok((agent, count))
            })
            .collect()
    }
}
