use chrono::NaiveDate;
use clap::{CommandFactory, FromArgMatches, Parser};
use qsoparty::config::{ContestConfig, RuleSet};
use qsoparty::error::QsoPartyError;
use qsoparty::types::{Band, Mode, ModeClass};
use std::io::Write;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: ContestConfig,
}

fn parse_cli(args: &[&str]) -> (ContestConfig, clap::ArgMatches) {
    let matches = TestCli::command().get_matches_from(args);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

#[test]
fn test_defaults_compile() {
    let rules = RuleSet::compile(&ContestConfig::default()).unwrap();

    assert_eq!(rules.bands.len(), 8);
    assert_eq!(rules.band_for(1800), Some(Band::M160));
    assert_eq!(rules.band_for(14350), Some(Band::M20));
    assert_eq!(rules.band_for(14351), None);
    assert_eq!(rules.mode_class(Mode::Ssb), Some(ModeClass::Phone));
    assert_eq!(rules.mode_class(Mode::Ft4), Some(ModeClass::CwDigital));
    assert_eq!(rules.points_for(ModeClass::CwDigital), 4);
    assert_eq!(rules.club_callsign, "N5LCC");
    assert!(rules.is_ambiguous("OH"));
    assert!(!rules.is_ambiguous("TX"));
    assert_eq!(
        rules.window_start,
        NaiveDate::from_ymd_opt(2026, 4, 11)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    );
}

#[test]
fn test_clap_defaults_match_default_impl() {
    let (cli, _) = parse_cli(&["test"]);
    let def = ContestConfig::default();

    assert_eq!(cli.window.contest_start, def.window.contest_start);
    assert_eq!(cli.scoring.club_bonus, def.scoring.club_bonus);
    assert_eq!(cli.exchange.band_plan, def.exchange.band_plan);
    assert_eq!(cli.exchange.canadian_prefixes, def.exchange.canadian_prefixes);
}

#[test]
fn test_load_partial_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"scoring": {{"club_bonus": 250}}, "window": {{"contest_start": "2027-04-10 1400", "contest_end": "2027-04-11 0200"}}}}"#
    )
    .unwrap();

    let config = ContestConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.scoring.club_bonus, 250);
    assert_eq!(config.scoring.phone_points, 2);
    assert_eq!(config.window.contest_start, "2027-04-10 1400");
    assert_eq!(config.exchange.dx_marker, "DX");
}

#[test]
fn test_load_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    assert!(matches!(
        ContestConfig::load_from_file(file.path()),
        Err(QsoPartyError::Json(_))
    ));
}

#[test]
fn test_explicit_flags_override_file() {
    let mut config = ContestConfig::default();
    config.scoring.club_bonus = 500;
    config.scoring.phone_points = 3;

    let (cli, matches) = parse_cli(&["test", "--club-bonus", "250"]);
    config.merge_from_cli(&cli, &matches);

    assert_eq!(config.scoring.club_bonus, 250);
    // not typed on the command line, so the file value stays
    assert_eq!(config.scoring.phone_points, 3);
}

#[test]
fn test_string_flags_override_file() {
    let mut config = ContestConfig::default();
    config.exchange.dx_marker = "XX".to_string();

    let (cli, matches) = parse_cli(&["test", "--club-callsign", "W5CLUB", "--workers", "3"]);
    config.merge_from_cli(&cli, &matches);

    assert_eq!(config.scoring.club_callsign, "W5CLUB");
    assert_eq!(config.batch.workers, 3);
    assert_eq!(config.exchange.dx_marker, "XX");
}

#[test]
fn test_compile_rejects_bad_rules() {
    let mut config = ContestConfig::default();
    config.window.contest_end = "2026-04-10 0000".to_string();
    assert!(matches!(RuleSet::compile(&config), Err(QsoPartyError::Config(_))));

    let mut config = ContestConfig::default();
    config.window.contest_start = "April 11".to_string();
    assert!(matches!(RuleSet::compile(&config), Err(QsoPartyError::Config(_))));

    let mut config = ContestConfig::default();
    config.exchange.band_plan = "20:14350-14000".to_string();
    assert!(matches!(RuleSet::compile(&config), Err(QsoPartyError::Config(_))));

    let mut config = ContestConfig::default();
    config.exchange.phone_modes = "PH,CW".to_string();
    assert!(matches!(RuleSet::compile(&config), Err(QsoPartyError::Config(_))));

    let mut config = ContestConfig::default();
    config.scoring.club_callsign = "  ".to_string();
    assert!(matches!(RuleSet::compile(&config), Err(QsoPartyError::Config(_))));
}

#[test]
fn test_custom_band_plan() {
    let mut config = ContestConfig::default();
    config.exchange.band_plan = "40:7000-7125, 20:14000-14150".to_string();
    let rules = RuleSet::compile(&config).unwrap();

    assert_eq!(rules.bands.len(), 2);
    assert_eq!(rules.band_for(7200), None);
    assert_eq!(rules.band_or_passthrough(20), Some(Band::M20));
    assert_eq!(rules.band_or_passthrough(80), None);
}
