//! Descriptive statistics over a filtered dataset.
//!
//! Four independent report sections: travel times, station popularity, trip
//! duration, and user demographics. Each section is a plain data value so
//! the rendering layer (terminal or JSON) stays separate from computation.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::error::ExploreError;
use crate::loader::Dataset;

/// The most frequent value(s) in a column. Ties keep every tied value, in
/// ascending order, together with the shared occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mode<T> {
    pub values: Vec<T>,
    pub count: usize,
}

/// One value/count pair from a categorical tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountEntry {
    pub value: String,
    pub count: usize,
}

/// Most frequent month, day of week, and start hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub month: Mode<u32>,
    pub weekday: Mode<String>,
    pub hour: Mode<u32>,
}

/// Most popular start station, end station, and start-end combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: Mode<String>,
    pub end_station: Mode<String>,
    pub trip: Mode<String>,
}

/// Total and mean travel time, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_secs: f64,
    pub mean_secs: f64,
}

/// Birth-year aggregates, only meaningful for demographics-capable cities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: Mode<i32>,
}

/// Gender and birth-year breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demographics {
    pub gender_counts: Vec<CountEntry>,
    pub birth_years: BirthYearStats,
}

/// User-type tally, plus demographics when the city's dataset carries them.
/// For cities without gender/birth-year columns the field is absent from
/// the report, not zeroed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_type_counts: Vec<CountEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demographics: Option<Demographics>,
}

/// Complete structured result of one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub city: String,
    pub row_count: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub duration: DurationStats,
    pub users: UserStats,
}

/// Tallies an iterator of values and keeps every value tied for the top
/// count. Fails when there is nothing to tally.
pub fn mode_of<T, I>(values: I, what: &'static str) -> Result<Mode<T>, ExploreError>
where
    T: Eq + Hash + Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    let top = counts
        .values()
        .copied()
        .max()
        .ok_or(ExploreError::EmptyDataset { what })?;

    let mut tied: Vec<T> = counts
        .into_iter()
        .filter(|(_, c)| *c == top)
        .map(|(v, _)| v)
        .collect();
    tied.sort();

    Ok(Mode {
        values: tied,
        count: top,
    })
}

/// Counts occurrences per distinct value, ordered by descending count and
/// then ascending value so tied tallies come out deterministically.
fn value_counts<'a, I>(values: I) -> Vec<CountEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(value, count)| CountEntry {
            value: value.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    entries
}

/// Most frequent travel times: month, day of week, start hour.
pub fn time_stats(dataset: &Dataset) -> Result<TimeStats, ExploreError> {
    Ok(TimeStats {
        month: mode_of(dataset.trips.iter().map(|t| t.month), "month")?,
        weekday: mode_of(
            dataset.trips.iter().map(|t| t.weekday.clone()),
            "day of week",
        )?,
        hour: mode_of(dataset.trips.iter().map(|t| t.hour), "start hour")?,
    })
}

/// Most popular stations and start-end combination.
pub fn station_stats(dataset: &Dataset) -> Result<StationStats, ExploreError> {
    Ok(StationStats {
        start_station: mode_of(
            dataset.trips.iter().map(|t| t.start_station.clone()),
            "start station",
        )?,
        end_station: mode_of(
            dataset.trips.iter().map(|t| t.end_station.clone()),
            "end station",
        )?,
        trip: mode_of(dataset.trips.iter().map(|t| t.trip_label()), "trip")?,
    })
}

/// Total and mean trip duration in seconds.
pub fn duration_stats(dataset: &Dataset) -> Result<DurationStats, ExploreError> {
    if dataset.is_empty() {
        return Err(ExploreError::EmptyDataset {
            what: "trip duration",
        });
    }
    let total: f64 = dataset.trips.iter().map(|t| t.duration_secs).sum();
    Ok(DurationStats {
        total_secs: total,
        mean_secs: total / dataset.len() as f64,
    })
}

/// User-type counts, plus gender and birth-year breakdowns when the city's
/// dataset declares those columns. Rows with an empty category are left out
/// of the tallies rather than counted as their own bucket.
pub fn user_stats(dataset: &Dataset) -> Result<UserStats, ExploreError> {
    let user_type_counts = value_counts(
        dataset
            .trips
            .iter()
            .map(|t| t.user_type.as_str())
            .filter(|u| !u.is_empty()),
    );

    let demographics = if dataset.city.has_demographics {
        let gender_counts =
            value_counts(dataset.trips.iter().filter_map(|t| t.gender.as_deref()));

        let years: Vec<i32> = dataset.trips.iter().filter_map(|t| t.birth_year).collect();
        let earliest = years
            .iter()
            .copied()
            .min()
            .ok_or(ExploreError::EmptyDataset { what: "birth year" })?;
        let most_recent = years
            .iter()
            .copied()
            .max()
            .ok_or(ExploreError::EmptyDataset { what: "birth year" })?;
        let most_common = mode_of(years, "birth year")?;

        Some(Demographics {
            gender_counts,
            birth_years: BirthYearStats {
                earliest,
                most_recent,
                most_common,
            },
        })
    } else {
        None
    };

    Ok(UserStats {
        user_type_counts,
        demographics,
    })
}
