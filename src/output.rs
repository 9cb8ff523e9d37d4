//! Terminal and JSON rendering of a [`StatsReport`].
//!
//! Computation returns plain values; everything printed to the user lives
//! here. Diagnostic logging stays on the tracing side.

use std::fmt::Display;
use std::time::Instant;

use anyhow::Result;
use tracing::debug;

use crate::filter::MONTH_NAMES;
use crate::loader::Dataset;
use crate::stats::{CountEntry, Mode, StatsReport};

const RULE: &str = "----------------------------------------";

/// Prints the first `limit` trips of the dataset, the display-size hint the
/// user chose at the prompt.
pub fn print_preview(dataset: &Dataset, limit: usize) {
    println!("\nFirst {} of {} trips:", limit.min(dataset.len()), dataset.len());
    for trip in dataset.trips.iter().take(limit) {
        println!(
            "  {}  {:>7.0}s  {} -> {}  [{}]",
            trip.start_time, trip.duration_secs, trip.start_station, trip.end_station, trip.user_type
        );
    }
    println!("{RULE}");
}

/// Prints every report section with per-section timing, matching the
/// interactive tool's classic layout.
pub fn print_report(report: &StatsReport) {
    section("Calculating The Most Frequent Times of Travel...", || {
        println!("Most frequent month: {}", month_names(&report.time.month));
        println!("Most common day of the week: {}", join(&report.time.weekday.values));
        println!("Most frequent start hour: {}", join(&report.time.hour.values));
    });

    section("Calculating The Most Popular Stations and Trip...", || {
        println!("Most common start station: {}", join(&report.stations.start_station.values));
        println!("Most common end station: {}", join(&report.stations.end_station.values));
        println!("Most common trip: {}", join(&report.stations.trip.values));
    });

    section("Calculating Trip Duration...", || {
        println!("Total travel time: {}s", report.duration.total_secs);
        println!("Mean travel time: {}s", report.duration.mean_secs);
    });

    section("Calculating User Stats...", || {
        println!("Counts of user types:");
        print_counts(&report.users.user_type_counts);

        if let Some(demo) = &report.users.demographics {
            println!("Counts of gender:");
            print_counts(&demo.gender_counts);
            println!("Earliest birth year: {}", demo.birth_years.earliest);
            println!("Most recent birth year: {}", demo.birth_years.most_recent);
            println!(
                "Most common birth year: {}",
                join(&demo.birth_years.most_common.values)
            );
        }
    });
}

/// Serializes the whole report as pretty JSON to stdout.
pub fn print_json(report: &StatsReport) -> Result<()> {
    debug!(city = %report.city, rows = report.row_count, "Rendering JSON report");
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn section(title: &str, body: impl FnOnce()) {
    println!("\n{title}\n");
    let started = Instant::now();
    body();
    println!("\nThis took {} seconds.", started.elapsed().as_secs_f64());
    println!("{RULE}");
}

fn print_counts(entries: &[CountEntry]) {
    for e in entries {
        println!("  {:<12} {}", e.value, e.count);
    }
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn month_names(mode: &Mode<u32>) -> String {
    let names: Vec<String> = mode
        .values
        .iter()
        .map(|m| capitalize(MONTH_NAMES[(*m as usize) - 1]))
        .collect();
    names.join(", ")
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
