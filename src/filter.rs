//! Month and day-of-week filtering.
//!
//! Selectors are validated up front so a typo surfaces as an error instead
//! of silently filtering everything out. Month and day filters are
//! independent; applying both retains the intersection regardless of order.

use tracing::debug;

use crate::error::ExploreError;
use crate::loader::Dataset;

pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Month selector: either no filter or a 1-based month ordinal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MonthFilter {
    All,
    Month(u32),
}

impl MonthFilter {
    /// Parses "all" or an English month name, case-insensitively.
    pub fn parse(selector: &str) -> Result<Self, ExploreError> {
        let wanted = selector.trim().to_lowercase();
        if wanted == "all" {
            return Ok(MonthFilter::All);
        }
        MONTH_NAMES
            .iter()
            .position(|m| *m == wanted)
            .map(|i| MonthFilter::Month(i as u32 + 1))
            .ok_or(ExploreError::UnknownMonth { name: wanted })
    }

    fn matches(&self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => *m == month,
        }
    }
}

/// Day-of-week selector: either no filter or a title-case weekday name.
#[derive(Debug, Clone, PartialEq)]
pub enum DayFilter {
    All,
    Day(String),
}

impl DayFilter {
    /// Parses "all" or an English weekday name, case-insensitively.
    pub fn parse(selector: &str) -> Result<Self, ExploreError> {
        let wanted = selector.trim().to_lowercase();
        if wanted == "all" {
            return Ok(DayFilter::All);
        }
        DAY_NAMES
            .iter()
            .find(|d| d.to_lowercase() == wanted)
            .map(|d| DayFilter::Day(d.to_string()))
            .ok_or(ExploreError::UnknownWeekday { name: wanted })
    }

    fn matches(&self, weekday: &str) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => d == weekday,
        }
    }
}

/// The user's validated city/month/day selection for one analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSpec {
    pub fn parse(month_selector: &str, day_selector: &str) -> Result<Self, ExploreError> {
        Ok(FilterSpec {
            month: MonthFilter::parse(month_selector)?,
            day: DayFilter::parse(day_selector)?,
        })
    }
}

/// Returns a new dataset containing only the trips matching the spec.
pub fn apply(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    let trips: Vec<_> = dataset
        .trips
        .iter()
        .filter(|t| spec.month.matches(t.month) && spec.day.matches(&t.weekday))
        .cloned()
        .collect();

    debug!(
        city = dataset.city.slug,
        before = dataset.len(),
        after = trips.len(),
        "Applied filters"
    );

    Dataset {
        city: dataset.city,
        trips,
    }
}
