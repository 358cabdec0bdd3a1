mod common;

use common::LogBuilder;
use qsoparty::cabrillo::{parse_log, LogRecord};
use qsoparty::normalizer::Normalizer;
use qsoparty::scorer::{BonusKind, MultiplierKey, ScoreBreakdown, Scorer};
use qsoparty::types::{Band, LocationClass, ModeCategory, ModeClass, PowerClass};
use qsoparty::validator::Validator;

/// Full pipeline short of aggregation; the fixture must validate cleanly.
fn score(text: &str) -> ScoreBreakdown {
    let rules = common::rules();
    let refs = common::refs();
    let parsed = parse_log(text);

    let validation = Validator::new(&rules, &refs).validate(&parsed);
    assert!(validation.is_valid(), "{}", validation.to_report());

    let record = LogRecord::from_parsed(&parsed, &rules).unwrap();
    let log = Normalizer::new(&rules, &refs).normalize(&record).unwrap();
    Scorer::new(&rules, &refs).score(&log)
}

#[test]
fn test_points_times_multipliers() {
    let s = score(
        &LogBuilder::new("W5ABC")
            .station("FIXED")
            .qso(14250, "CW", "1500", "ORLE", "K5XYZ", "TX")
            .qso(14050, "CW", "1501", "ORLE", "W5MS", "MS")
            .qso(7030, "CW", "1502", "ORLE", "K5XYZ", "TX")
            .qso(14250, "PH", "1503", "ORLE", "K5XYZ", "TX")
            .build(),
    );

    assert_eq!(s.raw_points, 14);
    assert_eq!(s.multiplier_count(), 4);
    assert!(s.bonuses.is_empty());
    assert_eq!(s.final_score, 56);
    assert_eq!(s.contacts_by_band.get(&Band::M20), Some(&3));
    assert_eq!(s.contacts_by_band.get(&Band::M40), Some(&1));
    assert_eq!(s.contacts_by_mode_class.get(&ModeClass::CwDigital), Some(&3));
    assert!(s.multipliers.contains(&MultiplierKey {
        band: Band::M40,
        mode_class: ModeClass::CwDigital,
        location: "TX".to_string(),
    }));
}

#[test]
fn test_duplicate_keys_count_once() {
    let s = score(
        &LogBuilder::new("W5ABC")
            .qso(14250, "CW", "1500", "ORLE", "K5XYZ", "TX")
            .qso(14020, "RTTY", "1501", "ORLE", "W5TX", "TX")
            .build(),
    );

    assert_eq!(s.raw_points, 8);
    assert_eq!(s.multiplier_count(), 1);
    assert_eq!(s.final_score, 8);
}

#[test]
fn test_club_bonus_is_awarded_once() {
    let s = score(
        &LogBuilder::new("W5ABC")
            .qso(14250, "PH", "1500", "ORLE", "N5LCC", "EBR")
            .qso(7200, "PH", "1501", "ORLE", "N5LCC/M", "EBR")
            .qso(14250, "PH", "1502", "ORLE", "N5LCC", "EBR")
            .build(),
    );

    assert_eq!(s.raw_points, 6);
    assert_eq!(s.multiplier_count(), 2);
    let bonus = s.bonus(BonusKind::ClubContact).expect("club bonus");
    assert_eq!((bonus.units, bonus.points), (1, 100));
    assert_eq!(s.bonus_points(), 100);
    assert_eq!(s.final_score, 12 + 100);
}

#[test]
fn test_rover_activation_bonus() {
    let s = score(
        &LogBuilder::new("W5ABC")
            .station("ROVER")
            .qso(14250, "PH", "1500", "ORLE", "K5XYZ", "TX")
            .qso(14250, "PH", "1600", "JEFF", "K5XYZ", "TX")
            .qso(14250, "PH", "1700", "CADD", "K5XYZ", "TX")
            .build(),
    );

    assert_eq!(s.category.location, LocationClass::LocalRover);
    assert_eq!(s.activated.len(), 3);
    let bonus = s.bonus(BonusKind::RoverActivation).expect("rover bonus");
    assert_eq!((bonus.units, bonus.points), (3, 150));
    assert_eq!(s.final_score, 6 + 150);
}

#[test]
fn test_fixed_log_never_gets_rover_bonus() {
    let s = score(
        &LogBuilder::new("W5ABC")
            .station("FIXED")
            .qso(14250, "PH", "1500", "ORLE", "K5XYZ", "TX")
            .qso(14250, "PH", "1600", "JEFF", "K5XYZ", "TX")
            .build(),
    );

    assert_eq!(s.category.location, LocationClass::LocalFixed);
    assert!(s.activated.is_empty());
    assert!(s.bonus(BonusKind::RoverActivation).is_none());
    assert_eq!(s.final_score, 4);
}

#[test]
fn test_non_local_logs_only_count_local_multipliers() {
    let s = score(
        &LogBuilder::new("K5XYZ")
            .qso(14250, "PH", "1500", "TX", "W5ABC", "ORLE")
            .qso(14250, "PH", "1501", "TX", "W5MS", "MS")
            .qso(14250, "PH", "1502", "TX", "DL1ABC", "DX")
            .build(),
    );

    assert_eq!(s.category.location, LocationClass::Regional);
    assert_eq!(s.raw_points, 6);
    assert_eq!(s.multiplier_count(), 1);
    assert_eq!(s.final_score, 6);
    assert!(s.worked.local.contains("ORLE"));
    assert!(s.worked.regional.contains("MS"));
    assert!(s.worked.foreign.contains("DX"));
}

#[test]
fn test_local_logs_count_every_location() {
    let s = score(
        &LogBuilder::new("W5ABC")
            .qso(14250, "PH", "1500", "ORLE", "OK1XYZ", "OK")
            .qso(14250, "PH", "1501", "ORLE", "VE3ABC", "ON")
            .qso(14250, "PH", "1502", "ORLE", "K5XYZ", "TX")
            .build(),
    );

    assert_eq!(s.multiplier_count(), 3);
    assert!(s.worked.foreign.contains("OKDX"));
    assert_eq!(s.final_score, 18);
}

#[test]
fn test_regional_log_to_regional_locations() {
    let s = score(
        &LogBuilder::new("K5XYZ")
            .power("LOW")
            .qso(14250, "PH", "1500", "TX", "W5MS", "MS")
            .qso(14260, "PH", "1501", "TX", "W5AR", "AR")
            .qso(14270, "PH", "1502", "TX", "W4AL", "AL")
            .build(),
    );

    assert_eq!(s.category.location, LocationClass::Regional);
    assert_eq!(s.category.mode, ModeCategory::PhoneOnly);
    assert_eq!(s.category.power, PowerClass::Low);
    assert_eq!(s.category.overlay, None);
    assert_eq!(s.raw_points, 6);
    assert_eq!(s.multiplier_count(), 0);
    assert_eq!(s.final_score, 0);
}

#[test]
fn test_regional_log_to_local_locations() {
    let s = score(
        &LogBuilder::new("K5XYZ")
            .qso(14250, "PH", "1500", "TX", "W5ABC", "ORLE")
            .qso(14260, "PH", "1501", "TX", "W5DEF", "JEFF")
            .qso(14270, "PH", "1502", "TX", "W5GHI", "CADD")
            .build(),
    );

    assert_eq!(s.multiplier_count(), 3);
    assert_eq!(s.final_score, 18);
}

#[test]
fn test_state_line_station_is_regional() {
    let s = score(
        &LogBuilder::new("K5XYZ")
            .qso(14250, "PH", "1500", "TX/AR", "W5ABC", "ORLE")
            .qso(14250, "PH", "1501", "TX/AR", "W5MS", "MS")
            .qso(14250, "PH", "1502", "TX/AR", "W4AL", "AL")
            .build(),
    );

    assert_eq!(s.category.location, LocationClass::Regional);
    assert_eq!(s.raw_points, 6);
    assert_eq!(s.multiplier_count(), 1);
    assert_eq!(s.final_score, 6);
}

#[test]
fn test_local_activity_counts() {
    let s = score(
        &LogBuilder::new("W5ABC")
            .station("ROVER")
            .qso(14250, "PH", "1500", "ORLE", "W5DEF", "JEFF")
            .qso(14250, "PH", "1501", "ORLE", "K5XYZ", "TX")
            .qso(14250, "PH", "1600", "JEFF", "W5GHI", "ORLE/CADD")
            .build(),
    );

    let orle = s.local_activity["ORLE"];
    assert_eq!((orle.sent, orle.received), (2, 1));
    let jeff = s.local_activity["JEFF"];
    assert_eq!((jeff.sent, jeff.received), (2, 1));
    let cadd = s.local_activity["CADD"];
    assert_eq!((cadd.sent, cadd.received), (0, 1));
    assert_eq!(s.total_contacts, 3);
    assert_eq!(s.valid_contacts, 4);
}

#[test]
fn test_rescoring_is_identical() {
    let text = LogBuilder::new("W5ABC")
        .qso(14250, "PH", "1500", "ORLE", "N5LCC", "EBR")
        .qso(7030, "CW", "1501", "ORLE", "K5XYZ", "TX/OK")
        .build();
    assert_eq!(score(&text), score(&text));
}
