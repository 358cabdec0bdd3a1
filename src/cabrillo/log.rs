use super::parser::{ParsedLog, Tag};
use super::{CONTACT_FIELDS, DATE_FORMAT, TIME_FORMAT};
use crate::config::RuleSet;
use crate::error::{QpResult, QsoPartyError};
use crate::types::{Mode, Overlay, PowerClass, StationClass};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationHeader {
    pub callsign: String,
    pub email: Option<String>,
    pub contest: Option<String>,
    pub power: PowerClass,
    /// None when absent or unrecognized.
    pub station: Option<StationClass>,
    pub overlay: Option<Overlay>,
    pub operator: Option<String>,
}

/// One side of an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exchange {
    pub call: String,
    pub report: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub line: usize,
    /// kHz as logged, or a band number in a prepared log.
    pub frequency: u32,
    pub mode: Mode,
    pub timestamp: NaiveDateTime,
    pub sent: Exchange,
    pub received: Exchange,
}

impl ContactRecord {
    pub fn from_tokens(line: usize, tokens: &[String]) -> QpResult<Self> {
        if tokens.len() != CONTACT_FIELDS {
            return Err(invariant(line, "contact does not have 11 fields"));
        }

        let frequency = tokens[1]
            .parse()
            .map_err(|_| invariant(line, "frequency is not a number"))?;
        let mode = Mode::from_str(&tokens[2]).map_err(|_| invariant(line, "unknown mode"))?;
        let timestamp = parse_timestamp(&tokens[3], &tokens[4])
            .ok_or_else(|| invariant(line, "unreadable date/time"))?;

        Ok(Self {
            line,
            frequency,
            mode,
            timestamp,
            sent: Exchange {
                call: tokens[5].clone(),
                report: tokens[6].clone(),
                location: tokens[7].clone(),
            },
            received: Exchange {
                call: tokens[8].clone(),
                report: tokens[9].clone(),
                location: tokens[10].clone(),
            },
        })
    }
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

/// Strictly four digits, then a real wall-clock time.
pub fn parse_time(time: &str) -> Option<NaiveTime> {
    if time.len() != 4 || !time.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveTime::parse_from_str(time, TIME_FORMAT).ok()
}

pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_time(time)?))
}

pub fn parse_power(values: &[String]) -> Option<PowerClass> {
    values.first().and_then(|v| PowerClass::from_str(v).ok())
}

pub fn parse_station(values: &[String]) -> Option<StationClass> {
    values.first().and_then(|v| StationClass::from_str(v).ok())
}

pub fn parse_overlay(values: &[String]) -> Option<Overlay> {
    values.first().and_then(|v| Overlay::from_str(v).ok())
}

/// Typed view of a log that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub header: StationHeader,
    pub contacts: Vec<ContactRecord>,
}

impl LogRecord {
    /// Anything unreadable here should have been rejected by the validator,
    /// so it is reported as an invariant violation.
    pub fn from_parsed(parsed: &ParsedLog, rules: &RuleSet) -> QpResult<Self> {
        let callsign = parsed
            .header(&Tag::Callsign)
            .and_then(|v| v.first())
            .cloned()
            .ok_or_else(|| QsoPartyError::Invariant("log has no CALLSIGN".to_string()))?;

        let power = parsed
            .header(&Tag::CategoryPower)
            .and_then(parse_power)
            .ok_or_else(|| {
                QsoPartyError::Invariant(format!("{}: no valid CATEGORY-POWER", callsign))
            })?;

        let joined = |tag: &Tag| {
            parsed
                .header(tag)
                .map(|v| v.join(" "))
                .filter(|s| !s.is_empty())
        };

        let header = StationHeader {
            email: joined(&Tag::Email),
            contest: joined(&Tag::Contest),
            operator: joined(&Tag::CategoryOperator),
            station: parsed.header(&Tag::CategoryStation).and_then(parse_station),
            overlay: parsed.header(&Tag::CategoryOverlay).and_then(parse_overlay),
            power,
            callsign,
        };

        let contacts = parsed
            .contacts()
            .map(|(line, tokens)| ContactRecord::from_tokens(line, tokens))
            .collect::<QpResult<Vec<_>>>()?;

        for c in &contacts {
            if rules.mode_class(c.mode).is_none() {
                return Err(invariant(c.line, "mode has no scoring class"));
            }
        }

        Ok(Self { header, contacts })
    }
}

fn invariant(line: usize, what: &str) -> QsoPartyError {
    QsoPartyError::Invariant(format!("line {}: {}", line, what))
}
