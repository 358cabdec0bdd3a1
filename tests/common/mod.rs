#![allow(dead_code)]

use qsoparty::config::{ContestConfig, RuleSet};
use qsoparty::reference::ReferenceData;
use std::path::PathBuf;

pub const LOCAL: [&str; 8] = ["ORLE", "JEFF", "CADD", "EBR", "LAFA", "STTA", "TANG", "BOSS"];
pub const REGIONAL: [&str; 12] = [
    "TX", "MS", "AR", "AL", "FL", "NY", "CA", "ON", "QC", "PA", "OK", "OH",
];

pub fn rules() -> RuleSet {
    RuleSet::compile(&ContestConfig::default()).unwrap()
}

pub fn refs() -> ReferenceData {
    ReferenceData::new(LOCAL, REGIONAL).unwrap()
}

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("reference")
}

pub fn shipped_refs() -> ReferenceData {
    let dir = data_dir();
    ReferenceData::load(dir.join("local_codes.txt"), dir.join("regional_codes.txt")).unwrap()
}

/// Builds Cabrillo text for tests. Contacts default to 2026-04-11, inside the window.
pub struct LogBuilder {
    call: String,
    power: Option<String>,
    station: Option<String>,
    overlay: Option<String>,
    operator: bool,
    start: bool,
    end: bool,
    qsos: Vec<String>,
}

impl LogBuilder {
    pub fn new(call: &str) -> Self {
        Self {
            call: call.to_string(),
            power: Some("LOW".to_string()),
            station: None,
            overlay: None,
            operator: true,
            start: true,
            end: true,
            qsos: Vec::new(),
        }
    }

    pub fn power(mut self, power: &str) -> Self {
        self.power = Some(power.to_string());
        self
    }

    pub fn no_power(mut self) -> Self {
        self.power = None;
        self
    }

    pub fn station(mut self, station: &str) -> Self {
        self.station = Some(station.to_string());
        self
    }

    pub fn overlay(mut self, overlay: &str) -> Self {
        self.overlay = Some(overlay.to_string());
        self
    }

    pub fn no_operator(mut self) -> Self {
        self.operator = false;
        self
    }

    pub fn no_end(mut self) -> Self {
        self.end = false;
        self
    }

    /// Contact sent by this log's own callsign.
    pub fn qso(self, freq: u32, mode: &str, time: &str, sent_loc: &str, rcvd_call: &str, rcvd_loc: &str) -> Self {
        let call = self.call.clone();
        self.qso_as(&call, freq, mode, time, sent_loc, rcvd_call, rcvd_loc)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn qso_as(
        mut self,
        sent_call: &str,
        freq: u32,
        mode: &str,
        time: &str,
        sent_loc: &str,
        rcvd_call: &str,
        rcvd_loc: &str,
    ) -> Self {
        self.qsos.push(format!(
            "QSO: {} {} 2026-04-11 {} {} 59 {} {} 59 {}",
            freq, mode, time, sent_call, sent_loc, rcvd_call, rcvd_loc
        ));
        self
    }

    /// Raw contact text after `QSO:`.
    pub fn qso_line(mut self, fields: &str) -> Self {
        self.qsos.push(format!("QSO: {}", fields));
        self
    }

    pub fn build(&self) -> String {
        let mut lines = Vec::new();
        if self.start {
            lines.push("START-OF-LOG: 3.0".to_string());
        }
        lines.push("CONTEST: LA-QSO-PARTY".to_string());
        lines.push(format!("CALLSIGN: {}", self.call));
        if let Some(p) = &self.power {
            lines.push(format!("CATEGORY-POWER: {}", p));
        }
        if let Some(s) = &self.station {
            lines.push(format!("CATEGORY-STATION: {}", s));
        }
        if let Some(o) = &self.overlay {
            lines.push(format!("CATEGORY-OVERLAY: {}", o));
        }
        if self.operator {
            lines.push("CATEGORY-OPERATOR: SINGLE-OP".to_string());
        }
        lines.push("EMAIL: op@example.com".to_string());
        lines.extend(self.qsos.iter().cloned());
        if self.end {
            lines.push("END-OF-LOG:".to_string());
        }
        lines.join("\n")
    }
}
