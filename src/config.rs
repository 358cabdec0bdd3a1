use crate::error::{QpResult, QsoPartyError};
use crate::types::{Band, Mode, ModeClass};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

pub const WINDOW_FORMAT: &str = "%Y-%m-%d %H%M";

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContestConfig {
    #[command(flatten)]
    pub batch: BatchParams,
    #[command(flatten)]
    pub window: ContestWindow,
    #[command(flatten)]
    pub scoring: ScoringRules,
    #[command(flatten)]
    pub exchange: ExchangeRules,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchParams {
    /// Worker threads for batch runs (0 = available parallelism)
    #[arg(long, default_value_t = 0)]
    pub workers: usize,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self { workers: 0 }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContestWindow {
    /// First valid contact instant, UTC, "YYYY-MM-DD HHMM"
    #[arg(long, default_value = "2026-04-11 1400")]
    pub contest_start: String,
    /// Last valid contact instant, UTC, inclusive
    #[arg(long, default_value = "2026-04-12 0200")]
    pub contest_end: String,
}

impl Default for ContestWindow {
    fn default() -> Self {
        Self {
            contest_start: "2026-04-11 1400".to_string(),
            contest_end: "2026-04-12 0200".to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    #[arg(long, default_value_t = 2)]
    pub phone_points: u32,
    #[arg(long, default_value_t = 4)]
    pub cw_digital_points: u32,

    // === BONUSES ===
    #[arg(long, default_value = "N5LCC")]
    pub club_callsign: String,
    #[arg(long, default_value_t = 100)]
    pub club_bonus: u32,
    #[arg(long, default_value_t = 50)]
    pub rover_location_bonus: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            phone_points: 2,
            cw_digital_points: 4,
            club_callsign: "N5LCC".to_string(),
            club_bonus: 100,
            rover_location_bonus: 50,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeRules {
    /// Comma separated `band:low-high` entries in kHz, inclusive
    #[arg(
        long,
        default_value = "160:1800-2000,80:3500-4000,40:7000-7300,20:14000-14350,15:21000-21450,10:28000-29700,6:50000-54000,2:144000-148000"
    )]
    pub band_plan: String,
    #[arg(long, default_value = "PH,FM,SSB,LSB,USB")]
    pub phone_modes: String,
    #[arg(long, default_value = "CW,RY,DG,DIG,RTTY,FT8,FT4")]
    pub cw_digital_modes: String,

    // === DX HANDLING ===
    /// Codes that mean one thing from a DX station and another from a US one
    #[arg(long, default_value = "ON,PA,CT,TN,LA,HI,OK,CO,OH")]
    pub ambiguous_codes: String,
    #[arg(long, default_value = "DX")]
    pub dx_marker: String,
    /// Generic exchange sent by stations outside the reference sets
    #[arg(long, default_value = "DX")]
    pub dx_location: String,

    // === CALLSIGN PREFIXES ===
    #[arg(long, default_value = "K,W,N,AA,AB,AC,AD,AE,AF,AG,AH,AI,AJ,AK")]
    pub us_prefixes: String,
    #[arg(
        long,
        default_value = "VA,VE,VY,VO,CF,CG,CH,CI,CJ,CK,CY,CZ,XJ,XK,XL,XM,XN,XO"
    )]
    pub canadian_prefixes: String,
}

impl Default for ExchangeRules {
    fn default() -> Self {
        Self {
            band_plan: "160:1800-2000,80:3500-4000,40:7000-7300,20:14000-14350,15:21000-21450,10:28000-29700,6:50000-54000,2:144000-148000".to_string(),
            phone_modes: "PH,FM,SSB,LSB,USB".to_string(),
            cw_digital_modes: "CW,RY,DG,DIG,RTTY,FT8,FT4".to_string(),
            ambiguous_codes: "ON,PA,CT,TN,LA,HI,OK,CO,OH".to_string(),
            dx_marker: "DX".to_string(),
            dx_location: "DX".to_string(),
            us_prefixes: "K,W,N,AA,AB,AC,AD,AE,AF,AG,AH,AI,AJ,AK".to_string(),
            canadian_prefixes: "VA,VE,VY,VO,CF,CG,CH,CI,CJ,CK,CY,CZ,XJ,XK,XL,XM,XN,XO"
                .to_string(),
        }
    }
}

impl ContestConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> QpResult<Self> {
        let path = path.as_ref();
        info!("Loading contest config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlays every value the user typed explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli: &ContestConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(batch.workers);

        update_if_present!(window.contest_start);
        update_if_present!(window.contest_end);

        update_if_present!(scoring.phone_points);
        update_if_present!(scoring.cw_digital_points);
        update_if_present!(scoring.club_callsign);
        update_if_present!(scoring.club_bonus);
        update_if_present!(scoring.rover_location_bonus);

        update_if_present!(exchange.band_plan);
        update_if_present!(exchange.phone_modes);
        update_if_present!(exchange.cw_digital_modes);
        update_if_present!(exchange.ambiguous_codes);
        update_if_present!(exchange.dx_marker);
        update_if_present!(exchange.dx_location);
        update_if_present!(exchange.us_prefixes);
        update_if_present!(exchange.canadian_prefixes);
    }
}

// === COMPILED RULES ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRange {
    pub band: Band,
    pub low_khz: u32,
    pub high_khz: u32,
}

impl BandRange {
    pub fn contains(&self, khz: u32) -> bool {
        (self.low_khz..=self.high_khz).contains(&khz)
    }
}

/// Immutable, parsed form of a `ContestConfig`. Built once per run and shared.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub bands: Vec<BandRange>,
    mode_classes: HashMap<Mode, ModeClass>,
    pub phone_points: u32,
    pub cw_digital_points: u32,
    pub club_callsign: String,
    pub club_bonus: u32,
    pub rover_location_bonus: u32,
    pub ambiguous_codes: HashSet<String>,
    pub dx_marker: String,
    pub dx_location: String,
    pub us_prefixes: HashSet<String>,
    pub canadian_prefixes: HashSet<String>,
}

impl RuleSet {
    pub fn compile(config: &ContestConfig) -> QpResult<Self> {
        let window_start = parse_instant(&config.window.contest_start, "contest_start")?;
        let window_end = parse_instant(&config.window.contest_end, "contest_end")?;
        if window_end < window_start {
            return Err(QsoPartyError::Config(format!(
                "Contest end {} is before start {}",
                window_end, window_start
            )));
        }

        let bands = parse_band_plan(&config.exchange.band_plan)?;

        let mut mode_classes = HashMap::new();
        for mode in parse_modes(&config.exchange.phone_modes, "phone_modes")? {
            mode_classes.insert(mode, ModeClass::Phone);
        }
        for mode in parse_modes(&config.exchange.cw_digital_modes, "cw_digital_modes")? {
            if mode_classes.insert(mode, ModeClass::CwDigital).is_some() {
                return Err(QsoPartyError::Config(format!(
                    "Mode {} is listed as both phone and CW/digital",
                    mode
                )));
            }
        }

        let club_callsign = config.scoring.club_callsign.trim().to_uppercase();
        if club_callsign.is_empty() {
            return Err(QsoPartyError::Config("club_callsign is empty".to_string()));
        }

        let dx_marker = config.exchange.dx_marker.trim().to_uppercase();
        if dx_marker.is_empty() {
            return Err(QsoPartyError::Config("dx_marker is empty".to_string()));
        }

        Ok(Self {
            window_start,
            window_end,
            bands,
            mode_classes,
            phone_points: config.scoring.phone_points,
            cw_digital_points: config.scoring.cw_digital_points,
            club_callsign,
            club_bonus: config.scoring.club_bonus,
            rover_location_bonus: config.scoring.rover_location_bonus,
            ambiguous_codes: parse_code_list(&config.exchange.ambiguous_codes)
                .into_iter()
                .collect(),
            dx_marker,
            dx_location: config.exchange.dx_location.trim().to_uppercase(),
            us_prefixes: parse_code_list(&config.exchange.us_prefixes)
                .into_iter()
                .collect(),
            canadian_prefixes: parse_code_list(&config.exchange.canadian_prefixes)
                .into_iter()
                .collect(),
        })
    }

    /// Band whose inclusive kHz range holds `khz`.
    pub fn band_for(&self, khz: u32) -> Option<Band> {
        self.bands.iter().find(|r| r.contains(khz)).map(|r| r.band)
    }

    /// Like `band_for`, but a value that is already a band number maps to that band.
    pub fn band_or_passthrough(&self, value: u32) -> Option<Band> {
        self.band_for(value).or_else(|| {
            Band::from_meters(value).filter(|b| self.bands.iter().any(|r| r.band == *b))
        })
    }

    pub fn mode_class(&self, mode: Mode) -> Option<ModeClass> {
        self.mode_classes.get(&mode).copied()
    }

    pub fn points_for(&self, class: ModeClass) -> u32 {
        match class {
            ModeClass::Phone => self.phone_points,
            ModeClass::CwDigital => self.cw_digital_points,
        }
    }

    pub fn window_contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.window_start && instant <= self.window_end
    }

    pub fn is_contest_day(&self, date: NaiveDate) -> bool {
        date >= self.window_start.date() && date <= self.window_end.date()
    }

    pub fn is_ambiguous(&self, code: &str) -> bool {
        self.ambiguous_codes.contains(code)
    }
}

fn parse_instant(s: &str, name: &str) -> QpResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), WINDOW_FORMAT).map_err(|e| {
        QsoPartyError::Config(format!(
            "--{} '{}' is not \"YYYY-MM-DD HHMM\": {}",
            name, s, e
        ))
    })
}

fn parse_band_plan(s: &str) -> QpResult<Vec<BandRange>> {
    let mut ranges: Vec<BandRange> = Vec::new();
    for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let bad = || QsoPartyError::Config(format!("Band plan entry '{}' is not band:low-high", entry));

        let (band, range) = entry.split_once(':').ok_or_else(bad)?;
        let (low, high) = range.split_once('-').ok_or_else(bad)?;
        let band = Band::from_str(band.trim()).map_err(|_| bad())?;
        let low_khz: u32 = low.trim().parse().map_err(|_| bad())?;
        let high_khz: u32 = high.trim().parse().map_err(|_| bad())?;
        if low_khz > high_khz {
            return Err(bad());
        }

        let range = BandRange {
            band,
            low_khz,
            high_khz,
        };
        if let Some(other) = ranges
            .iter()
            .find(|r| r.band == band || (r.low_khz <= high_khz && low_khz <= r.high_khz))
        {
            return Err(QsoPartyError::Config(format!(
                "Band plan entry '{}' collides with {}",
                entry, other.band
            )));
        }
        ranges.push(range);
    }

    if ranges.is_empty() {
        return Err(QsoPartyError::Config("Band plan is empty".to_string()));
    }
    ranges.sort_by_key(|r| r.band);
    Ok(ranges)
}

fn parse_modes(s: &str, name: &str) -> QpResult<Vec<Mode>> {
    parse_code_list(s)
        .iter()
        .map(|m| {
            Mode::from_str(m)
                .map_err(|_| QsoPartyError::Config(format!("Unknown mode '{}' in {}", m, name)))
        })
        .collect()
}

fn parse_code_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .collect()
}
