//! CSV loading and derived-field computation.
//!
//! Rows are deserialized by header name, so column order and extra columns
//! (the source files carry an unnamed index column) do not matter. The load
//! fails fast on the first malformed timestamp or number; a failed load
//! returns no dataset at all.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Deserialize;
use tracing::debug;

use crate::error::ExploreError;
use crate::registry::CityInfo;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single row as it appears in the source CSV, before any parsing.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: String,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

/// One parsed trip, including the fields derived from its start timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_secs: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived from start_time at load, never mutated afterwards
    pub month: u32,
    pub hour: u32,
    pub weekday: String,
}

impl Trip {
    /// The derived trip label: start and end station joined by " - ".
    pub fn trip_label(&self) -> String {
        format!("{} - {}", self.start_station, self.end_station)
    }
}

/// An in-memory table of trips for one city.
///
/// Filtering produces a new `Dataset`; a returned dataset is never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub city: &'static CityInfo,
    pub trips: Vec<Trip>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Loads a city's trip table from its source CSV.
pub fn load(city: &'static CityInfo, path: &Path) -> Result<Dataset, ExploreError> {
    debug!(city = city.slug, path = %path.display(), "Loading trip CSV");
    let file = File::open(path)?;
    load_from_reader(city, file)
}

/// Loads a trip table from any CSV reader. Used directly by tests.
pub fn load_from_reader<R: Read>(
    city: &'static CityInfo,
    reader: R,
) -> Result<Dataset, ExploreError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut trips = Vec::new();

    for (i, result) in rdr.deserialize().enumerate() {
        let row = i + 1;
        let raw: RawTrip = result?;
        trips.push(parse_row(row, raw)?);
    }

    debug!(city = city.slug, rows = trips.len(), "Trip CSV loaded");
    Ok(Dataset { city, trips })
}

fn parse_row(row: usize, raw: RawTrip) -> Result<Trip, ExploreError> {
    let start_time = parse_timestamp(row, &raw.start_time)?;
    let end_time = parse_timestamp(row, &raw.end_time)?;

    let duration_secs = raw.trip_duration.trim().parse::<f64>().map_err(|_| {
        ExploreError::MalformedNumeric {
            row,
            value: raw.trip_duration.clone(),
        }
    })?;

    let gender = raw.gender.filter(|g| !g.trim().is_empty());
    let birth_year = parse_birth_year(row, raw.birth_year)?;

    Ok(Trip {
        month: start_time.month(),
        hour: start_time.hour(),
        weekday: start_time.format("%A").to_string(),
        start_time,
        end_time,
        duration_secs,
        start_station: raw.start_station,
        end_station: raw.end_station,
        user_type: raw.user_type,
        gender,
        birth_year,
    })
}

fn parse_timestamp(row: usize, value: &str) -> Result<NaiveDateTime, ExploreError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        ExploreError::MalformedTimestamp {
            row,
            value: value.to_string(),
        }
    })
}

/// Birth years are stored as floats in the source files ("1992.0"); empty
/// cells mean the rider did not report one.
fn parse_birth_year(row: usize, value: Option<String>) -> Result<Option<i32>, ExploreError> {
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => {
            let year = s
                .trim()
                .parse::<f64>()
                .map_err(|_| ExploreError::MalformedNumeric { row, value: s })?;
            Ok(Some(year as i32))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    fn chicago() -> &'static CityInfo {
        Registry::new("data").resolve("chicago").unwrap()
    }

    fn washington() -> &'static CityInfo {
        Registry::new("data").resolve("washington").unwrap()
    }

    const SAMPLE: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
1,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
2,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
";

    #[test]
    fn test_load_parses_rows_and_derives_fields() {
        let ds = load_from_reader(chicago(), SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.trips[0];
        assert_eq!(first.month, 6);
        assert_eq!(first.hour, 15);
        assert_eq!(first.weekday, "Friday");
        assert_eq!(first.duration_secs, 321.0);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
        assert_eq!(
            first.trip_label(),
            "Wood St & Hubbard St - Damen Ave & Chicago Ave"
        );
    }

    #[test]
    fn test_derived_fields_match_start_timestamp() {
        let ds = load_from_reader(chicago(), SAMPLE.as_bytes()).unwrap();
        for trip in &ds.trips {
            assert_eq!(trip.month, trip.start_time.month());
            assert_eq!(trip.hour, trip.start_time.hour());
            assert_eq!(trip.weekday, trip.start_time.format("%A").to_string());
        }
    }

    #[test]
    fn test_empty_demographic_cells_become_none() {
        let ds = load_from_reader(chicago(), SAMPLE.as_bytes()).unwrap();
        let last = &ds.trips[2];
        assert_eq!(last.gender, None);
        assert_eq!(last.birth_year, None);
    }

    #[test]
    fn test_missing_demographic_columns_are_tolerated() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-03-01 09:00:00,2017-03-01 09:10:00,600,A,B,Subscriber
";
        let ds = load_from_reader(washington(), csv.as_bytes()).unwrap();
        assert_eq!(ds.trips[0].gender, None);
        assert_eq!(ds.trips[0].birth_year, None);
    }

    #[test]
    fn test_malformed_timestamp_fails_fast() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-03-01 09:00:00,2017-03-01 09:10:00,600,A,B,Subscriber
not-a-date,2017-03-01 09:10:00,600,A,B,Subscriber
";
        let err = load_from_reader(washington(), csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ExploreError::MalformedTimestamp { row: 2, value } if value == "not-a-date"
        ));
    }

    #[test]
    fn test_malformed_duration_fails_fast() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-03-01 09:00:00,2017-03-01 09:10:00,lots,A,B,Subscriber
";
        let err = load_from_reader(washington(), csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ExploreError::MalformedNumeric { row: 1, value } if value == "lots"
        ));
    }
}
