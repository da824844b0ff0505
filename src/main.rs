//! relnotes - CLI entry point.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use relnotes::NotesConfig;
use relnotes::git::{GitCli, Git2History, HistoryProvider, extract_commits};
use relnotes::notes::{ReleaseVersion, classify, compose, emit, generate_summary, render_json};

/// Generate release notes from the commits since the previous release tag.
#[derive(Parser, Debug)]
#[command(name = "relnotes")]
#[command(about = "Generate release notes from the commits since the previous release tag")]
#[command(version)]
struct Cli {
    /// Version being released, e.g. v1.2.3
    #[arg(value_name = "VERSION")]
    release_version: Option<String>,

    /// Repository to read history from
    #[arg(short = 'C', long = "repo", default_value = ".")]
    repo: PathBuf,

    /// How to read commit history
    #[arg(long, value_enum, default_value_t = Backend::Git)]
    backend: Backend,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Write to a file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Run the `git` binary
    Git,
    /// Read the repository in-process
    Libgit2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(raw_version) = cli.release_version else {
        eprintln!("Usage: relnotes <version>");
        std::process::exit(1);
    };

    let config = NotesConfig::from_env();
    let version = ReleaseVersion::new(raw_version);

    let provider: Box<dyn HistoryProvider> = match cli.backend {
        Backend::Git => Box::new(GitCli::new(&cli.repo)),
        Backend::Libgit2 => Box::new(Git2History::new(&cli.repo)),
    };

    let commits = extract_commits(provider.as_ref()).await;
    let classified = classify(commits);
    info!("{}", generate_summary(&classified));

    let document = match cli.format {
        Format::Markdown => compose(&version, &classified, &config),
        Format::Json => render_json(&version, &classified).context("Failed to render JSON")?,
    };

    emit(&document, cli.output.as_deref()).context("Failed to write release notes")?;

    if let Some(path) = &cli.output {
        info!(path = %path.display(), "Wrote release notes");
    }

    Ok(())
}

/// Log to stderr so stdout carries only the document.
///
/// Colour is only used when stderr is a terminal.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_version_does_not_clash_with_version_flag() {
        let cli = Cli::try_parse_from(["relnotes", "v1.2.3"]).expect("should parse");
        assert_eq!(cli.release_version.as_deref(), Some("v1.2.3"));

        let cli = Cli::try_parse_from(["relnotes"]).expect("version is optional at parse time");
        assert!(cli.release_version.is_none());
    }
}
