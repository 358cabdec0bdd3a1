//! Field predicates shared by the validator's contact checks.

use crate::cabrillo::log::{parse_date, parse_time};
use crate::callsign;
use crate::config::RuleSet;
use crate::reference::ReferenceData;
use crate::types::{Band, Mode};
use chrono::{NaiveDate, NaiveTime};
use std::str::FromStr;

pub fn band_of(rules: &RuleSet, freq: &str) -> Option<Band> {
    freq.parse::<u32>().ok().and_then(|khz| rules.band_for(khz))
}

/// A known mode that the rule set also assigns a scoring class.
pub fn contest_mode(rules: &RuleSet, mode: &str) -> Option<Mode> {
    Mode::from_str(mode)
        .ok()
        .filter(|m| rules.mode_class(*m).is_some())
}

pub fn contest_date(rules: &RuleSet, date: &str) -> Option<NaiveDate> {
    parse_date(date).filter(|d| rules.is_contest_day(*d))
}

pub fn well_formed_time(time: &str) -> Option<NaiveTime> {
    parse_time(time)
}

pub fn location_shape_ok(location: &str) -> bool {
    !location.is_empty() && !location.chars().all(|c| c.is_ascii_digit())
}

/// Local or Regional. The generic DX exchange is known only from a station
/// outside the US and Canada.
pub fn known_location(rules: &RuleSet, refs: &ReferenceData, code: &str, call: &str) -> bool {
    refs.is_local(code)
        || refs.is_regional(code)
        || (code == rules.dx_location && callsign::is_foreign(call, rules))
}

pub fn is_multi_location(location: &str) -> bool {
    location.contains('/')
}
