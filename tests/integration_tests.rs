use bikeshare_explorer::error::ExploreError;
use bikeshare_explorer::pipeline::{compute_all_stats, load_filtered_dataset};
use bikeshare_explorer::registry::Registry;

fn registry() -> Registry {
    Registry::new("tests/fixtures")
}

#[test]
fn test_full_pipeline_filtered() {
    let ds = load_filtered_dataset(&registry(), "Chicago", "June", "monday").unwrap();
    assert_eq!(ds.len(), 3);

    let report = compute_all_stats(&ds).unwrap();

    assert_eq!(report.city, "chicago");
    assert_eq!(report.row_count, 3);

    assert_eq!(report.time.month.values, vec![6]);
    assert_eq!(report.time.weekday.values, vec!["Monday"]);
    assert_eq!(report.time.hour.values, vec![8]);
    assert_eq!(report.time.hour.count, 2);

    assert_eq!(report.stations.start_station.values, vec!["Clark St & Elm St"]);
    assert_eq!(
        report.stations.trip.values,
        vec!["Clark St & Elm St - Wells St & Concord Ln"]
    );
    assert_eq!(report.stations.trip.count, 2);

    assert_eq!(report.duration.total_secs, 3000.0);
    assert_eq!(report.duration.mean_secs, 1000.0);

    assert_eq!(report.users.user_type_counts[0].value, "Subscriber");
    assert_eq!(report.users.user_type_counts[0].count, 3);

    let demo = report.users.demographics.unwrap();
    assert_eq!(demo.gender_counts[0].value, "Male");
    assert_eq!(demo.gender_counts[0].count, 2);
    assert_eq!(demo.birth_years.earliest, 1989);
    assert_eq!(demo.birth_years.most_recent, 1992);
    assert_eq!(demo.birth_years.most_common.values, vec![1992]);
}

#[test]
fn test_full_pipeline_unfiltered() {
    let ds = load_filtered_dataset(&registry(), "chicago", "all", "All").unwrap();
    assert_eq!(ds.len(), 6);

    let report = compute_all_stats(&ds).unwrap();
    assert_eq!(report.time.month.values, vec![6]);
    assert_eq!(report.time.month.count, 4);
    assert_eq!(report.duration.total_secs, 7800.0);
    assert_eq!(report.duration.mean_secs, 1300.0);
}

#[test]
fn test_city_without_demographics_omits_section() {
    let ds = load_filtered_dataset(&registry(), "washington", "all", "all").unwrap();
    let report = compute_all_stats(&ds).unwrap();

    assert_eq!(report.users.user_type_counts[0].value, "Registered");
    assert_eq!(report.users.user_type_counts[0].count, 2);
    assert!(report.users.demographics.is_none());
}

#[test]
fn test_unknown_city_surfaces_before_load() {
    let err = load_filtered_dataset(&registry(), "springfield", "all", "all").unwrap_err();
    assert!(matches!(err, ExploreError::UnknownCity { .. }));
}

#[test]
fn test_filter_yielding_no_rows_fails_stats() {
    // fixture has no December trips
    let ds = load_filtered_dataset(&registry(), "chicago", "december", "all").unwrap();
    assert!(ds.is_empty());

    let err = compute_all_stats(&ds).unwrap_err();
    assert!(matches!(err, ExploreError::EmptyDataset { .. }));
}
