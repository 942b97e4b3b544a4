/*!
 * Command-line interface for filexport
 */

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;

use filexport::app::{AppEvent, AppState, StatusLevel};
use filexport::clipboard::ClipboardWriter;
use filexport::config::{Args, Config};
use filexport::error::Result;
use filexport::extractor::Extractor;
use filexport::report::{ExportReport, ReportFormat, Reporter};
use filexport::utils::collect_sources;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    init_logging(args.verbose);

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        clap_complete::generate(shell, &mut command, "filexport", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    // Create configuration
    let config = Config::from_args(args);

    match run(&config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(config: &Config) -> Result<ExitCode> {
    // Validate configuration
    config.validate()?;

    // Configure thread pool
    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        log::warn!("Failed to set thread pool size: {}", e);
    }

    let sources = collect_sources(&config.paths, config.recursive)?;

    let progress = ProgressBar::new(sources.len() as u64);
    let style = ProgressStyle::with_template(
        "{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Reading");

    let extractor = Extractor::new(Arc::new(progress.clone()));

    let mut state = AppState::new();
    state.apply(AppEvent::FormatSelected(config.format), Instant::now());

    // Start timing both read and convert operations
    let start_time = Instant::now();

    let batch = extractor.extract(&sources);
    progress.finish_and_clear();

    match batch {
        Ok(records) => state.apply(AppEvent::BatchLoaded(records), Instant::now()),
        Err(e) => {
            state.apply(AppEvent::BatchFailed(e.to_string()), Instant::now());
            print_status(&state);
            return Ok(ExitCode::FAILURE);
        }
    }

    let document = state.export()?;
    let duration = start_time.elapsed();

    match &config.output_file {
        Some(path) => fs::write(path, &document)?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", document)?;
            stdout.flush()?;
        }
    }

    let copied = if config.clip {
        let copied = ClipboardWriter::system().write(&document);
        state.apply(AppEvent::CopyFinished(copied), Instant::now());
        print_status(&state);
        Some(copied)
    } else {
        None
    };

    if config.report {
        let stats = extractor.get_statistics();
        let report = ExportReport {
            destination: config.destination(),
            format: state.format(),
            duration,
            files_processed: stats.files_processed,
            total_lines: stats.total_lines,
            total_chars: stats.total_chars,
            total_bytes: stats.total_bytes,
            export_bytes: document.len(),
            file_details: stats.file_details,
            copied,
        };

        Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
    }

    Ok(ExitCode::SUCCESS)
}

/// Print the visible status line, if any, on stderr
fn print_status(state: &AppState) {
    if let Some(status) = state.status_at(Instant::now()) {
        let marker = match status.level {
            StatusLevel::Success => "✅",
            StatusLevel::Error => "❌",
        };
        eprintln!("{} {}", marker, status.text);
    }
}
