use chart_axis_engine::ChartError;
use chart_axis_engine::core::{DateKey, DateSkeletonBuilder, Granularity, Skeleton};
use chrono::{NaiveDateTime, Weekday};
use indexmap::IndexSet;

fn at(key: &str) -> NaiveDateTime {
    DateKey::parse(key).expect("valid key").datetime()
}

fn keys(skeleton: &Skeleton) -> Vec<&str> {
    skeleton.iter().map(DateKey::as_str).collect()
}

fn blocked(keys: &[&str]) -> IndexSet<DateKey> {
    keys.iter()
        .map(|key| DateKey::parse(key).expect("valid block key"))
        .collect()
}

fn build(granularity: Granularity, start: &str, stop: &str) -> Skeleton {
    DateSkeletonBuilder::new(granularity).build(at(start), at(stop), &IndexSet::new())
}

#[test]
fn month_slot_is_pinned_to_month_end() {
    let skeleton = build(Granularity::Month, "2014-01-02", "2014-01-31");
    assert_eq!(keys(&skeleton), vec!["20140131"]);
}

#[test]
fn month_slots_span_years() {
    let skeleton = build(Granularity::Month, "2013-11-15", "2014-02-28");
    assert_eq!(
        keys(&skeleton),
        vec!["20131130", "20131231", "20140131", "20140228"]
    );
}

#[test]
fn month_end_after_stop_is_not_emitted() {
    let skeleton = build(Granularity::Month, "2014-01-02", "2014-01-30");
    assert!(skeleton.is_empty());
}

#[test]
fn weekly_friday_slots() {
    let skeleton = build(Granularity::friday(), "2014-01-01", "2014-01-31");
    assert_eq!(
        keys(&skeleton),
        vec!["20140103", "20140110", "20140117", "20140124", "20140131"]
    );
}

#[test]
fn weekly_sunday_slots() {
    let skeleton = build(Granularity::sunday(), "2014-01-01", "2014-01-31");
    assert_eq!(
        keys(&skeleton),
        vec!["20140105", "20140112", "20140119", "20140126"]
    );
    assert_eq!(Granularity::sunday(), Granularity::WeeklyOnDay(Weekday::Sun));
}

#[test]
fn weekday_slots_skip_weekends() {
    let skeleton = build(Granularity::Weekday, "2014-01-01", "2014-01-07");
    assert_eq!(
        keys(&skeleton),
        vec!["20140101", "20140102", "20140103", "20140106", "20140107"]
    );
}

#[test]
fn day_slots_honor_block_list_in_any_layout() {
    let skeleton = DateSkeletonBuilder::new(Granularity::Day).build(
        at("20140101"),
        at("20140105"),
        &blocked(&["20140102", "2014-01-04"]),
    );
    assert_eq!(keys(&skeleton), vec!["20140101", "20140103", "20140105"]);
}

#[test]
fn long_format_uses_separators() {
    let skeleton = DateSkeletonBuilder::new(Granularity::Day)
        .with_long_format(true)
        .build(at("20140101"), at("20140103"), &IndexSet::new());
    assert_eq!(
        keys(&skeleton),
        vec!["2014-01-01", "2014-01-02", "2014-01-03"]
    );
}

#[test]
fn hourly_slots_cross_midnight() {
    let skeleton = build(Granularity::Hour, "20140101 220000", "20140102 010000");
    assert_eq!(
        keys(&skeleton),
        vec![
            "20140101 220000",
            "20140101 230000",
            "20140102 000000",
            "20140102 010000"
        ]
    );
}

#[test]
fn hourly_slots_before_epoch_are_empty() {
    assert!(build(Granularity::Hour, "19691231 200000", "19700101 040000").is_empty());
    assert_eq!(
        build(Granularity::Minute, "19691231 235900", "19700101 000000").len(),
        2
    );
}

#[test]
fn date_only_bounds_drive_sub_day_steps() {
    let skeleton = build(Granularity::Hour, "20140101", "20140102");
    assert_eq!(skeleton.len(), 25);
    assert_eq!(skeleton.last().map(DateKey::as_str), Some("20140102 000000"));
}

#[test]
fn second_slots_in_long_format() {
    let skeleton = DateSkeletonBuilder::new(Granularity::Second)
        .with_long_format(true)
        .build(
            at("2014-01-01 00:00:58"),
            at("2014-01-01 00:01:01"),
            &IndexSet::new(),
        );
    assert_eq!(
        keys(&skeleton),
        vec![
            "2014-01-01 00:00:58",
            "2014-01-01 00:00:59",
            "2014-01-01 00:01:00",
            "2014-01-01 00:01:01"
        ]
    );
}

#[test]
fn block_entries_remove_exactly_their_instant() {
    let builder = DateSkeletonBuilder::new(Granularity::Hour);

    let one_slot = builder.build(
        at("20140101 220000"),
        at("20140102 010000"),
        &blocked(&["20140101 230000"]),
    );
    assert_eq!(
        keys(&one_slot),
        vec!["20140101 220000", "20140102 000000", "20140102 010000"]
    );

    let midnight_only = builder.build(
        at("20140101 220000"),
        at("20140102 030000"),
        &blocked(&["20140102"]),
    );
    assert_eq!(
        keys(&midnight_only),
        vec![
            "20140101 220000",
            "20140101 230000",
            "20140102 010000",
            "20140102 020000",
            "20140102 030000"
        ]
    );

    let intraday_entry_on_daily = DateSkeletonBuilder::new(Granularity::Day).build(
        at("20140101"),
        at("20140103"),
        &blocked(&["20140102 103000"]),
    );
    assert_eq!(intraday_entry_on_daily.len(), 3);
}

#[test]
fn inverted_range_is_empty() {
    assert!(build(Granularity::Day, "20140110", "20140101").is_empty());
}

#[test]
fn skeleton_lookups() {
    let skeleton = build(Granularity::friday(), "2014-01-01", "2014-01-31");

    assert_eq!(skeleton.index_of("20140117"), Some(2));
    assert_eq!(skeleton.index_of("20140116"), None);
    assert_eq!(skeleton.lower_bound("20140116"), 2);
    assert_eq!(skeleton.lower_bound("20140201"), skeleton.len());
    assert_eq!(skeleton.get(0).map(DateKey::as_str), Some("20140103"));
    assert!(skeleton.format().is_some_and(|format| format.width() == 8));
}

#[test]
fn validated_skeleton_rejects_mixed_widths_and_disorder() {
    let mixed = vec![
        DateKey::parse("20140101").expect("key"),
        DateKey::parse("2014-01-02").expect("key"),
    ];
    assert!(matches!(
        Skeleton::from_keys(mixed),
        Err(ChartError::MixedDateFormats { .. })
    ));

    let unsorted = vec![
        DateKey::parse("20140102").expect("key"),
        DateKey::parse("20140101").expect("key"),
    ];
    assert!(matches!(
        Skeleton::from_keys(unsorted),
        Err(ChartError::UnsortedSeries { index: 1 })
    ));

    let skeleton = build(Granularity::Day, "20140101", "20140103");
    let json = serde_json::to_string(&skeleton).expect("serialize");
    let back: Skeleton = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, skeleton);
    assert!(serde_json::from_str::<Skeleton>("[\"20140102\",\"20140101\"]").is_err());
}
