use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use esmify_rewrite::Config;
use log::{LevelFilter, debug, error, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "esmify", version)]
#[command(
    about = "Rewrite relative import specifiers in compiled TypeScript to explicit .js paths",
    long_about = None
)]
struct Cli {
    /// Log verbosity (defaults to RUST_LOG, then info)
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    #[command(flatten)]
    config: Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

fn init_logging(level: Option<LogLevel>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level.into());
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    if let Some(level) = cli.log_level {
        info!("Using log level {:?}", level);
    }
    debug!("Config: path={:?}, ignore_file={:?}", cli.config.path, cli.config.ignore_file);

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let start = Instant::now();
    let num_threads = rayon::current_num_threads();
    info!("Rewriting specifiers under {} (using {} threads)", cli.config.path.display(), num_threads);

    let root = cli.config.path.clone();
    let summary = match esmify_rewrite::run_rewrite(cli.config) {
        Ok(summary) => summary,
        Err(e) => {
            error!("ERROR: {:#}", e);
            std::process::exit(1);
        }
    };

    let elapsed_ms = start.elapsed().as_millis();

    esmify_rewrite::print_failures(&mut stdout, &summary, &root)?;
    esmify_rewrite::print_summary(&mut stdout, &summary)?;
    writeln!(
        stdout,
        "\n{} Finished in {}ms (using {} threads).",
        "●".bright_blue(),
        elapsed_ms.to_string().cyan(),
        num_threads.to_string().cyan()
    )?;
    stdout.flush()?;

    Ok(())
}
