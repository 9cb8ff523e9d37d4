//! The core callable surface: registry → loader → filter, and the four
//! stat computations assembled into one report.

use tracing::info;

use crate::error::ExploreError;
use crate::filter::{self, FilterSpec};
use crate::loader::{self, Dataset};
use crate::registry::Registry;
use crate::stats::{self, StatsReport};

/// Resolves a city, validates the selectors, loads the city's trips, and
/// applies the filters.
///
/// Selector validation happens before any file I/O, so an unknown city,
/// month, or day never touches the data source.
pub fn load_filtered_dataset(
    registry: &Registry,
    city: &str,
    month_selector: &str,
    day_selector: &str,
) -> Result<Dataset, ExploreError> {
    let info = registry.resolve(city)?;
    let spec = FilterSpec::parse(month_selector, day_selector)?;

    let dataset = loader::load(info, &registry.source_path(info))?;
    let filtered = filter::apply(&dataset, &spec);

    info!(
        city = info.slug,
        loaded = dataset.len(),
        retained = filtered.len(),
        "Dataset ready"
    );
    Ok(filtered)
}

/// Computes all four report sections over a filtered dataset. Demographics
/// are included exactly when the dataset's city declares those columns.
pub fn compute_all_stats(dataset: &Dataset) -> Result<StatsReport, ExploreError> {
    Ok(StatsReport {
        city: dataset.city.slug.to_string(),
        row_count: dataset.len(),
        time: stats::time_stats(dataset)?,
        stations: stats::station_stats(dataset)?,
        duration: stats::duration_stats(dataset)?,
        users: stats::user_stats(dataset)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_city_fails_before_touching_data() {
        // nonexistent data dir: a load attempt would fail with Io instead
        let registry = Registry::new("/definitely/not/here");
        let err = load_filtered_dataset(&registry, "atlantis", "all", "all").unwrap_err();
        assert!(matches!(err, ExploreError::UnknownCity { .. }));
    }

    #[test]
    fn test_bad_selectors_fail_before_touching_data() {
        let registry = Registry::new("/definitely/not/here");

        let err = load_filtered_dataset(&registry, "chicago", "smarch", "all").unwrap_err();
        assert!(matches!(err, ExploreError::UnknownMonth { .. }));

        let err = load_filtered_dataset(&registry, "chicago", "all", "someday").unwrap_err();
        assert!(matches!(err, ExploreError::UnknownWeekday { .. }));
    }
}
