//! docnb - render docutils XML to Markdown or Jupyter notebooks

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use docnb::{Document, Format, RenderConfig};

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Markdown,
    Notebook,
}

impl From<Target> for Format {
    fn from(target: Target) -> Self {
        match target {
            Target::Markdown => Format::Markdown,
            Target::Notebook => Format::Notebook,
        }
    }
}

#[derive(Parser)]
#[command(name = "docnb")]
#[command(version, about = "Render docutils XML to Markdown or Jupyter notebooks", long_about = None)]
#[command(after_help = "EXAMPLES:
    docnb guide.xml                   Print Markdown to stdout
    docnb guide.xml guide.ipynb       Write a notebook
    docnb guide.xml --to notebook     Print notebook JSON to stdout")]
struct Cli {
    /// Input file (docutils XML)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (.md or .ipynb); stdout when omitted
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output format (default: from OUTPUT's extension, else markdown)
    #[arg(long, value_enum)]
    to: Option<Target>,

    /// JSON render configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match convert(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> docnb::Result<RenderConfig> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(io::BufReader::new(file))?)
        }
        None => Ok(RenderConfig::default()),
    }
}

fn convert(cli: &Cli) -> docnb::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let format = cli
        .to
        .map(Format::from)
        .or_else(|| cli.output.as_deref().and_then(Format::from_path))
        .unwrap_or_default();

    let doc = Document::open(&cli.input)?;
    log::debug!(
        "loaded {} ({} nodes), rendering as {format:?}",
        cli.input.display(),
        doc.node_count()
    );

    match &cli.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            format.export(&doc, config, &mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            format.export(&doc, config, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}
