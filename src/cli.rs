//! CLI parsing and orchestration. Parses args, scrapes every requested show
//! id into one catalog, prints it as TSV or JSON. Maps errors to exit codes.

use crate::model::ShowCatalog;
use crate::output::{self, OutputError, OutputFormat};
use crate::scraper::{scrape_show, PageMode, PoliteClient, ScrapeOptions, ScraperError};
use clap::Parser;
use std::time::Duration;
use thiserror::Error;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Scraper(#[from] ScraperError),

    #[error("{0}")]
    Output(#[from] OutputError),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Scraper(_) => 2,
            CliRunError::Output(_) => 3,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "hslinks")]
#[command(about = "List HorribleSubs episode download links as tab-separated rows")]
pub struct Args {
    /// HorribleSubs show id(s).
    #[arg(value_name = "SHOW_ID", required = true)]
    pub show_ids: Vec<u64>,

    /// Fetch every listing page until the server reports the end, instead of
    /// only the first page.
    #[arg(long)]
    pub all: bool,

    /// Output format: tsv or json.
    #[arg(long, default_value = "tsv", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress progress output (errors only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Print verbose error chain.
    #[arg(long)]
    pub verbose: bool,

    /// HTTP User-Agent (default: a browser-like one).
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Delay between requests in seconds (default 0).
    #[arg(long)]
    pub delay: Option<u64>,

    /// Request timeout in seconds (default 30).
    #[arg(long)]
    pub timeout: Option<u64>,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "tsv" => Ok(OutputFormat::Tsv),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid --format value: '{}'. Use tsv or json.", s)),
    }
}

fn make_spinner(show_id: u64) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(indicatif::ProgressStyle::default_spinner().tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(format!("Fetching show {}", show_id));
    pb
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code
/// and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let mut builder = PoliteClient::builder();
    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua.clone());
    }
    if let Some(delay) = args.delay {
        builder = builder.delay_secs(delay);
    }
    if let Some(timeout) = args.timeout {
        builder = builder.timeout_secs(timeout);
    }
    let mut client = builder
        .build()
        .map_err(|e| CliRunError::InvalidInput(format!("Failed to create HTTP client: {}", e)))?;

    let mode = if args.all {
        PageMode::AllPages
    } else {
        PageMode::FirstPage
    };

    let mut catalog = ShowCatalog::new();
    for &show_id in &args.show_ids {
        let spinner = if args.quiet {
            None
        } else {
            Some(make_spinner(show_id))
        };
        let progress_cb = |page: u64| {
            if let Some(pb) = &spinner {
                pb.set_message(format!("Fetching show {} page {}", show_id, page));
            }
        };
        let options = ScrapeOptions {
            mode,
            progress: if args.quiet { None } else { Some(&progress_cb) },
        };
        let result = scrape_show(&mut client, show_id, &options, &mut catalog);
        if let Some(pb) = &spinner {
            pb.finish_and_clear();
        }
        result?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Tsv => output::write_tsv(&mut out, &catalog, output::use_color())?,
        OutputFormat::Json => output::write_json(&mut out, &catalog)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_format_all() {
        assert_eq!(parse_format("tsv").unwrap(), OutputFormat::Tsv);
        assert_eq!(parse_format("json").unwrap(), OutputFormat::Json);
        assert_eq!(parse_format("TSV").unwrap(), OutputFormat::Tsv);
    }

    #[test]
    fn parse_format_invalid() {
        assert!(parse_format("xml").is_err());
    }

    #[test]
    fn args_require_at_least_one_show_id() {
        assert!(Args::try_parse_from(["hslinks"]).is_err());
    }

    #[test]
    fn args_accept_multiple_show_ids() {
        let args = Args::try_parse_from(["hslinks", "347", "1211"]).unwrap();
        assert_eq!(args.show_ids, vec![347, 1211]);
        assert!(!args.all);
        assert_eq!(args.format, OutputFormat::Tsv);
    }

    #[test]
    fn args_reject_non_integer_show_id() {
        assert!(Args::try_parse_from(["hslinks", "naruto"]).is_err());
    }

    #[test]
    fn args_all_flag() {
        let args = Args::try_parse_from(["hslinks", "--all", "347"]).unwrap();
        assert!(args.all);
    }

    #[test]
    fn args_client_overrides() {
        let args = Args::try_parse_from([
            "hslinks",
            "--user-agent",
            "Custom/1.0",
            "--delay",
            "2",
            "--timeout",
            "10",
            "347",
        ])
        .unwrap();
        assert_eq!(args.user_agent.as_deref(), Some("Custom/1.0"));
        assert_eq!(args.delay, Some(2));
        assert_eq!(args.timeout, Some(10));
    }

    #[test]
    fn cli_run_error_exit_codes() {
        assert_eq!(CliRunError::InvalidInput("x".into()).exit_code(), 1);
        assert_eq!(
            CliRunError::Scraper(ScraperError::MarkupShape {
                reason: "x".into()
            })
            .exit_code(),
            2
        );
        assert_eq!(
            CliRunError::Output(OutputError::Write(std::io::Error::new(
                std::io::ErrorKind::Other,
                "x"
            )))
            .exit_code(),
            3
        );
    }
}
