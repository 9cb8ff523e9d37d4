//! CLI entry point for the bikeshare explorer.
//!
//! Runs one-shot when a city is given on the command line, otherwise drops
//! into the interactive prompt-and-restart loop. All statistics computation
//! lives in the library; this binary only gathers parameters, presents
//! errors, and renders results.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use bikeshare_explorer::filter::{DayFilter, MonthFilter};
use bikeshare_explorer::output::{print_json, print_preview, print_report};
use bikeshare_explorer::pipeline::{compute_all_stats, load_filtered_dataset};
use bikeshare_explorer::registry::Registry;

#[derive(Parser)]
#[command(name = "bikeshare-explorer")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// City to analyze (chicago, new york city, washington). Prompts when omitted.
    #[arg(short, long)]
    city: Option<String>,

    /// Month filter: "all" or an English month name
    #[arg(short, long, default_value = "all")]
    month: String,

    /// Day-of-week filter: "all" or an English weekday name
    #[arg(short, long, default_value = "all")]
    day: String,

    /// Number of trips to preview before the statistics
    #[arg(short, long, default_value_t = 5)]
    preview: usize,

    /// Directory containing the city CSV files
    #[arg(long, default_value = "data")]
    data_dir: String,

    /// Emit the report as JSON instead of the terminal layout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Run a single analysis and exit without the restart prompt
    #[arg(long, default_value_t = false)]
    once: bool,
}

/// One fully validated analysis request.
struct Request {
    city: String,
    month: String,
    day: String,
    preview: usize,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let registry = Registry::new(&cli.data_dir);
    let one_shot = cli.once || cli.city.is_some();

    if cli.city.is_none() {
        println!("Hello! Let's explore some US bikeshare data!");
    }

    loop {
        let request = match &cli.city {
            Some(city) => Request {
                city: city.clone(),
                month: cli.month.clone(),
                day: cli.day.clone(),
                preview: cli.preview,
            },
            None => prompt_request(&registry, cli.preview)?,
        };

        match run_analysis(&registry, &request, cli.json) {
            Ok(()) => {}
            Err(e) if one_shot => return Err(e),
            Err(e) => {
                error!(error = %e, "Analysis failed");
                eprintln!("Sorry, that didn't work: {e}");
            }
        }

        if one_shot {
            break;
        }
        let again = read_line("\nWould you like to restart? Enter yes or no.\n")?;
        if !again.trim().eq_ignore_ascii_case("yes") {
            break;
        }
    }

    Ok(())
}

fn run_analysis(registry: &Registry, request: &Request, json: bool) -> Result<()> {
    let dataset = load_filtered_dataset(registry, &request.city, &request.month, &request.day)?;
    let report = compute_all_stats(&dataset)?;

    info!(
        city = %report.city,
        rows = report.row_count,
        "Report computed"
    );

    if json {
        print_json(&report)?;
    } else {
        print_preview(&dataset, request.preview);
        print_report(&report);
    }
    Ok(())
}

/// Asks for city, month, day, and sample size, re-asking on invalid input.
/// Validation happens here so the pipeline never sees a selector typo.
fn prompt_request(registry: &Registry, default_preview: usize) -> Result<Request> {
    let city = loop {
        let answer = read_line("Enter the city name: ")?;
        match registry.resolve(&answer) {
            Ok(info) => break info.slug.to_string(),
            Err(e) => println!("{e}"),
        }
    };

    let month = loop {
        let answer = read_line("Enter the desired month (or 'all'): ")?;
        match MonthFilter::parse(&answer) {
            Ok(_) => break answer.trim().to_string(),
            Err(e) => println!("{e}"),
        }
    };

    let day = loop {
        let answer = read_line("Enter the desired day of the week (or 'all'): ")?;
        match DayFilter::parse(&answer) {
            Ok(_) => break answer.trim().to_string(),
            Err(e) => println!("{e}"),
        }
    };

    let preview = loop {
        let answer = read_line("How many trips to preview? ")?;
        let answer = answer.trim();
        if answer.is_empty() {
            break default_preview;
        }
        match answer.parse::<usize>() {
            Ok(n) => break n,
            Err(_) => println!("Please enter a whole number."),
        }
    };

    println!("----------------------------------------");
    Ok(Request {
        city,
        month,
        day,
        preview,
    })
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
