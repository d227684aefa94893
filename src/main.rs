use clap::Parser;
use slidegrab::{Config, ConverterTool, Event, Pipeline, ToExitCode, shutdown_signal};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit code used when the run is interrupted by a signal
const INTERRUPTED: u8 = 130;

/// Back up an online slide deck to a single PDF
#[derive(Debug, Parser)]
#[command(name = "slidegrab", version, about)]
struct Cli {
    /// Presentation page URL (prompted for if omitted)
    #[arg(short, long, value_name = "URL")]
    input: Option<String>,

    /// Output file or directory (default: downloads/<title>-by-<author>.pdf)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Suppress progress messages
    #[arg(short, long)]
    quiet: bool,

    /// Keep the downloaded images in a folder next to the PDF
    #[arg(short, long)]
    jpg: bool,

    /// Use the legacy `convert` command instead of `magick`
    #[arg(long)]
    use_convert: bool,

    /// Network timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 20)]
    timeout: u64,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Parent directory for the temporary working area
    #[arg(long, value_name = "DIR", env = "SLIDEGRAB_WORK_DIR")]
    work_dir: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            if json {
                let body = serde_json::json!({
                    "error": e.error_code(),
                    "message": e.to_string(),
                });
                println!("{body}");
            }
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> slidegrab::Result<ExitCode> {
    let input = match cli.input {
        Some(input) => input,
        None => prompt_for_url()?,
    };

    let mut config = Config::new(input, cli.output.as_deref())?;
    config.output.retain_images = cli.jpg;
    config.fetch.timeout = Duration::from_secs(cli.timeout);
    config.work_dir = cli.work_dir;
    if cli.use_convert {
        config.assembly.tool = ConverterTool::Convert;
    }

    let mut pipeline = Pipeline::new(config)?;

    // Progress goes to stderr when stdout carries the JSON report.
    let to_stderr = cli.json;
    let printer = (!cli.quiet).then(|| {
        let mut events = pipeline.subscribe();
        tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                // Failures are reported once, by main.
                if matches!(event, Event::Failed { .. }) {
                    continue;
                }
                if to_stderr {
                    eprintln!("{event}");
                } else {
                    println!("{event}");
                }
            }
        })
    });

    let result = tokio::select! {
        result = pipeline.run() => result,
        _ = shutdown_signal() => {
            eprintln!("Interrupted");
            return Ok(ExitCode::from(INTERRUPTED));
        }
    };

    // Closing the channel lets the printer drain and stop.
    drop(pipeline);
    if let Some(printer) = printer {
        printer.await.ok();
    }

    let report = result?;
    if cli.json {
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
        println!("{json}");
    }
    Ok(ExitCode::SUCCESS)
}

fn prompt_for_url() -> std::io::Result<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "Input the slide deck URL you want to convert: ")?;
    stdout.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}
