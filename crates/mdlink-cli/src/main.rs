//! `mdlink`: drives the link engine over one line of text or one line of a file.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mdlink_config::Settings;
use mdlink_engine::{
    EditorState, LinkError, LinkSpan, Position, SkipLinkResult, TextDocument,
    conceal_ranges, detect_link_at_cursor, determine_link_operation, markdown_to_wiki, parse_query,
    validate_link_destination, wiki_to_markdown,
};
use serde::Serialize;
use std::{fmt::Debug, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "mdlink", version)]
#[command(about = "Inspect and edit wiki/markdown links the way an editor integration would")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (defaults to ~/.config/mdlink/settings.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Where the line under edit comes from.
#[derive(Args, Debug)]
struct LineSource {
    /// Line text to operate on
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    text: Option<String>,

    /// Markdown file to read the line from
    #[arg(long)]
    file: Option<PathBuf>,

    /// 0-based line number within --file
    #[arg(long, default_value_t = 0)]
    line: usize,
}

impl LineSource {
    fn load(&self) -> Result<(TextDocument, usize)> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok((TextDocument::from(text.as_str()), 0)),
            (None, Some(path)) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let doc = TextDocument::from(content.as_str());
                anyhow::ensure!(
                    self.line < doc.line_count(),
                    "Line {} is past the end of {} ({} lines)",
                    self.line,
                    path.display(),
                    doc.line_count()
                );
                Ok((doc, self.line))
            }
            (None, None) => anyhow::bail!("Either --text or --file is required"),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Wiki,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the link touching the cursor, if any
    Detect {
        #[command(flatten)]
        source: LineSource,
        /// 0-based char offset in the line
        #[arg(long)]
        cursor: usize,
    },
    /// Decide what the link command would edit or create
    Operation {
        #[command(flatten)]
        source: LineSource,
        #[arg(long)]
        cursor: usize,
        /// Selected text; the cursor is taken as the selection start
        #[arg(long, default_value = "")]
        selection: String,
        /// Clipboard contents
        #[arg(long, default_value = "")]
        clipboard: String,
    },
    /// Where the cursor lands when it skips over a link
    Skip {
        #[command(flatten)]
        source: LineSource,
        #[arg(long)]
        cursor: usize,
    },
    /// Where the cursor lands when the edit form closes on a link span
    Close {
        #[command(flatten)]
        source: LineSource,
        /// Span start (inclusive)
        #[arg(long)]
        start: usize,
        /// Span end (exclusive)
        #[arg(long)]
        end: usize,
        /// The link was entered from its right side
        #[arg(long)]
        from_right: bool,
    },
    /// Convert a destination between wiki and markdown notation
    Convert {
        #[arg(long, value_enum)]
        to: Format,
        destination: String,
    },
    /// Check a destination as the edit form would
    Validate {
        destination: String,
        /// Link text
        #[arg(long, default_value = "")]
        text: String,
        /// Validate as a wiki link
        #[arg(long)]
        wiki: bool,
    },
    /// Classify wiki destination suggester input
    Query { input: String },
    /// Char ranges to hide when rendering links
    Conceal {
        #[command(flatten)]
        source: LineSource,
        /// Links touching this offset stay fully visible
        #[arg(long)]
        cursor: Option<usize>,
    },
}

fn emit<T: Serialize + Debug>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{value:#?}");
    }
    Ok(())
}

fn convert(to: Format, destination: &str) -> Result<String, LinkError> {
    match to {
        Format::Markdown => Ok(wiki_to_markdown(destination)),
        Format::Wiki => markdown_to_wiki(destination)
            .into_option()
            .ok_or_else(|| LinkError::UrlNotRepresentable(destination.to_string())),
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    match path {
        Some(path) => Ok(Settings::load_from_path(path)?.unwrap_or_default()),
        None => Ok(Settings::load_or_default()?),
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_ref())?;
    log::debug!("settings: {settings:?}");

    match cli.command {
        Command::Detect { source, cursor } => {
            let (doc, line) = source.load()?;
            let text = doc.line_text(line).unwrap_or_default();
            emit(&detect_link_at_cursor(&text, cursor), cli.json)
        }
        Command::Operation {
            source,
            cursor,
            selection,
            clipboard,
        } => {
            let (doc, line) = source.load()?;
            let text = doc.line_text(line).unwrap_or_default();
            let op = determine_link_operation(&EditorState {
                line: &text,
                cursor_ch: cursor,
                selection: &selection,
                clipboard_text: &clipboard,
            });
            if let Some(notice) = &op.conversion_notice {
                log::info!("{notice}");
            }
            emit(&op, cli.json)
        }
        Command::Skip { source, cursor } => {
            let (doc, line) = source.load()?;
            let position = Position::new(line, cursor);
            let result = if settings.skip_over_links {
                doc.skip(position)
            } else {
                log::debug!("skip_over_links is off");
                SkipLinkResult {
                    position,
                    skipped: false,
                }
            };
            emit(&result, cli.json)
        }
        Command::Close {
            source,
            start,
            end,
            from_right,
        } => {
            anyhow::ensure!(start <= end, "--start must not exceed --end");
            let (doc, line) = source.load()?;
            let position = doc.close_position(line, LinkSpan::new(start, end), !from_right);
            emit(&position, cli.json)
        }
        Command::Convert { to, destination } => {
            let converted = convert(to, &destination)?;
            if cli.json {
                emit(&converted, true)
            } else {
                println!("{converted}");
                Ok(())
            }
        }
        Command::Validate {
            destination,
            text,
            wiki,
        } => emit(&validate_link_destination(&destination, &text, wiki), cli.json),
        Command::Query { input } => emit(&parse_query(&input), cli.json),
        Command::Conceal { source, cursor } => {
            let (doc, line) = source.load()?;
            let text = doc.line_text(line).unwrap_or_default();
            let ranges = if settings.conceal_link_syntax {
                conceal_ranges(&text, cursor)
            } else {
                log::debug!("conceal_link_syntax is off");
                vec![]
            };
            emit(&ranges, cli.json)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    run(cli)
}
