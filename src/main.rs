use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use summary::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "summary")]
#[command(about = "Render an AI-generated spending summary as HTML, Typst, PDF or JSON")]
struct Cli {
    /// Input summary file ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Output file (defaults to stdout; PDF defaults to the input name with .pdf extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Render settings (TOML); bundled defaults are used if the file is missing
    #[arg(short, long, default_value = "summary.toml")]
    config: PathBuf,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Html,
    Typst,
    Pdf,
    Json,
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;

    let input = cli.input.filter(|path| path != Path::new("-"));
    let text = match &input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            text
        }
    };

    let blocks = summary::parse(&text);

    let bytes = match cli.format {
        Format::Html => summary::to_html(&blocks, &config).into_bytes(),
        Format::Typst => summary::to_typst(&blocks, &config).into_bytes(),
        Format::Json => summary::to_json(&blocks, cli.pretty)?.into_bytes(),
        Format::Pdf => summary::to_pdf(&blocks, &config)?,
    };

    // PDF is binary, so without an explicit output it goes next to the input
    let output = match (cli.output, cli.format, &input) {
        (Some(output), _, _) => Some(output),
        (None, Format::Pdf, Some(input)) => Some(input.with_extension("pdf")),
        (None, _, _) => None,
    };

    match output {
        Some(path) => {
            fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), "wrote summary");
            println!("Created {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes).context("writing stdout")?;
            stdout.flush().context("writing stdout")?;
        }
    }

    Ok(())
}
