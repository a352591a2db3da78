//! Command-line interface.
//!
//! ```text
//! replykit list
//! replykit show 0
//! replykit render 0 --set req_number=1842 --on need_note --item items=first -o reply.txt
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use replykit_render::{Clock, FixedClock, RenderOptions, Renderer, SystemClock, DEFAULT_MAX_DEPTH};
use tracing::debug;

use crate::input::{parse_assignment, ValuesBuilder};
use crate::output::OutputDestination;
use crate::store::{TemplateStore, TEMPLATES_ENV};

/// Reply generator: pick a template, fill in values, get the reply text.
#[derive(Debug, Parser)]
#[command(name = "replykit", version, about)]
pub struct Cli {
    /// Template collection: a JSON (or .yaml/.yml) list of templates.
    /// Built-in templates are used when unset or missing.
    #[arg(long, global = true, env = TEMPLATES_ENV, value_name = "PATH")]
    pub templates: Option<PathBuf>,

    /// Log debug information to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available templates
    List,

    /// Print one template as JSON
    Show {
        /// Template id, as shown by `list`
        id: usize,
    },

    /// Render a template into reply text
    Render(RenderArgs),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template id, as shown by `list`
    pub id: usize,

    /// JSON or YAML file with a mapping of field values
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Set a text field
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Switch a toggle on
    #[arg(long = "on", value_name = "NAME")]
    pub on: Vec<String>,

    /// Append an element to a repeater list
    #[arg(long = "item", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub item: Vec<(String, String)>,

    /// Write the reply to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Render as if the current time were this ("YYYY-MM-DD HH:MM")
    #[arg(long, value_name = "TIME", value_parser = parse_timestamp)]
    pub at: Option<NaiveDateTime>,

    /// Maximum block nesting depth
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Parses `--at`, with or without seconds.
pub fn parse_timestamp(arg: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(arg.trim(), pattern).ok())
        .ok_or_else(|| format!("expected \"YYYY-MM-DD HH:MM\", got '{}'", arg))
}

/// Runs a parsed command line, writing normal output to `stdout`.
pub fn run(cli: &Cli, stdout: &mut dyn Write) -> anyhow::Result<()> {
    let store = TemplateStore::resolve(cli.templates.as_deref())
        .context("failed to load templates")?;

    match &cli.command {
        Command::List => {
            for summary in store.list() {
                writeln!(stdout, "{}\t{}", summary.id, summary.name)?;
            }
        }
        Command::Show { id } => {
            let template = store.get(*id)?;
            writeln!(stdout, "{}", serde_json::to_string_pretty(template)?)?;
        }
        Command::Render(args) => render(&store, args, stdout)?,
    }
    Ok(())
}

fn render(store: &TemplateStore, args: &RenderArgs, stdout: &mut dyn Write) -> anyhow::Result<()> {
    let template = store.get(args.id)?;

    let mut builder = ValuesBuilder::new();
    if let Some(path) = &args.values {
        builder = builder.file(path)?;
    }
    for (name, value) in &args.set {
        builder = builder.set(name, value);
    }
    for name in &args.on {
        builder = builder.on(name);
    }
    for (name, value) in &args.item {
        builder = builder.item(name, value);
    }
    let values = builder.build();

    let clock: Box<dyn Clock> = match args.at {
        Some(at) => Box::new(FixedClock::new(at)),
        None => Box::new(SystemClock),
    };
    let renderer =
        Renderer::new(clock).with_options(RenderOptions::new().with_max_depth(args.max_depth));
    let text = renderer
        .try_compose(template, &values)
        .with_context(|| format!("failed to render template {}", args.id))?;

    let destination = OutputDestination::from_path(args.output.as_deref());
    debug!(?destination, bytes = text.len(), "writing reply");
    destination
        .write_text(&text, stdout)
        .context("failed to write reply")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_arguments() {
        let cli = Cli::try_parse_from([
            "replykit",
            "render",
            "0",
            "--set",
            "req_number=1842",
            "--on",
            "need_note",
            "--item",
            "items=a",
            "--at",
            "2024-03-01 09:15",
        ])
        .unwrap();

        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.set, vec![("req_number".to_string(), "1842".to_string())]);
        assert_eq!(args.on, vec!["need_note".to_string()]);
        assert_eq!(args.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(args.at, Some(parse_timestamp("2024-03-01 09:15").unwrap()));
    }

    #[test]
    fn test_rejects_bad_assignment() {
        assert!(Cli::try_parse_from(["replykit", "render", "0", "--set", "oops"]).is_err());
    }

    #[test]
    fn test_parse_timestamp_forms() {
        assert!(parse_timestamp("2024-03-01 09:15").is_ok());
        assert!(parse_timestamp("2024-03-01 09:15:30").is_ok());
        assert!(parse_timestamp("2024-03-01T09:15:30").is_ok());
        assert!(parse_timestamp("tomorrow").is_err());
    }
}
