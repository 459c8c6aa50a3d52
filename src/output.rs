//! Output writers for the merged catalog: tab-separated rows (with optional
//! terminal bold styling) and JSON.

use crate::model::ShowCatalog;
use owo_colors::OwoColorize;
use std::env;
use std::io::{self, IsTerminal, Write};
use thiserror::Error;

/// Output format selector for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Json,
}

/// Errors from the output writers.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Styling applies only when stdout is an interactive terminal and the
/// NO_COLOR override is absent.
pub fn use_color() -> bool {
    io::stdout().is_terminal() && env::var_os("NO_COLOR").is_none()
}

fn emphasize(s: &str, color: bool) -> String {
    if color {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// Write one newline-terminated line per (show, episode, resolution,
/// link-kind, url) tuple, fields tab-separated in the order
/// show, episode, kind, resolution, url. Show name, episode id, and
/// resolution are bolded when `color` is set; kind and url never are.
pub fn write_tsv(
    out: &mut impl Write,
    catalog: &ShowCatalog,
    color: bool,
) -> Result<(), OutputError> {
    for (show, episodes) in catalog.shows() {
        for (episode, resolutions) in episodes {
            for (resolution, links) in resolutions {
                for (kind, url) in links {
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{}\t{}",
                        emphasize(show, color),
                        emphasize(episode, color),
                        kind,
                        emphasize(resolution, color),
                        url
                    )?;
                }
            }
        }
    }
    Ok(())
}

/// Write the catalog as nested JSON objects with a trailing newline.
pub fn write_json(out: &mut impl Write, catalog: &ShowCatalog) -> Result<(), OutputError> {
    serde_json::to_writer(&mut *out, catalog)?;
    writeln!(out)?;
    Ok(())
}
