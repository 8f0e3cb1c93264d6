//! flexgrid - render layout files to CSS or HTML.
//!
//! ```text
//! flexgrid page.yaml                      # stylesheet
//! flexgrid page.yaml --format html        # standalone document
//! flexgrid page.yaml --width 500          # computed declarations per node
//! ```
//!
//! Set `RUST_LOG=flexgrid=debug` to trace node resolution.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use console::style;
use flexgrid::{DocumentRenderer, LayoutConfig, LayoutNode, Stylesheet};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Css,
    Html,
}

#[derive(Debug, Parser)]
#[command(name = "flexgrid", version, about = "Render responsive layout files to CSS or HTML")]
struct Cli {
    /// Layout file (YAML, or JSON with a .json extension)
    file: PathBuf,

    /// Config file with breakpoints, unknown-breakpoint policy and class prefix
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Css)]
    format: Format,

    /// Print each node's computed declarations at this viewport width
    #[arg(short, long, value_name = "PX", conflicts_with = "format")]
    width: Option<u32>,

    /// Document title for HTML output
    #[arg(long, default_value = "Layout")]
    title: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LayoutConfig::default(),
    };
    let tree = LayoutNode::load(&cli.file)
        .with_context(|| format!("loading layout {}", cli.file.display()))?;
    let sheet = Stylesheet::build(&tree, &config)?;
    tracing::info!(nodes = sheet.nodes().len(), "resolved layout");

    if let Some(width) = cli.width {
        return Ok(computed_report(&sheet, width));
    }

    Ok(match cli.format {
        Format::Css => sheet.css(),
        Format::Html => DocumentRenderer::new()?.render(&sheet, &cli.title)?,
    })
}

fn computed_report(sheet: &Stylesheet, width: u32) -> String {
    let mut out = String::new();
    for (class, declarations) in sheet.computed_at(width) {
        out.push_str(&format!("{} @ {}px\n", style(format!(".{}", class)).bold(), width));
        for decl in declarations {
            out.push_str(&format!("  {}\n", decl));
        }
    }
    out
}
