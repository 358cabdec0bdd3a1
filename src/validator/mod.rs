pub mod checks;
pub mod findings;

pub use self::findings::{Finding, FindingKind, Severity, Side};

use crate::cabrillo::log::{parse_overlay, parse_power, parse_station};
use crate::cabrillo::{ParsedLog, Tag, CONTACT_FIELDS};
use crate::callsign;
use crate::config::RuleSet;
use crate::reference::ReferenceData;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub callsign: String,
    pub findings: Vec<Finding>,
    pub total_contacts: usize,
    pub invalid_contacts: usize,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(Finding::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_error())
    }

    /// The first error reported for a contact line.
    pub fn primary_error(&self, line: usize) -> Option<FindingKind> {
        self.errors()
            .find(|f| f.line == Some(line))
            .map(|f| f.kind)
    }

    pub fn to_report(&self) -> String {
        let status = if self.is_valid() { "VALID" } else { "INVALID" };
        let mut lines = vec![
            format!("Validation Report for {}", self.callsign),
            "=".repeat(60),
            format!("Total QSOs: {}", self.total_contacts),
            format!("Invalid QSOs: {}", self.invalid_contacts),
            format!("Overall Status: {}", status),
        ];

        for (title, items) in [
            ("Warnings", self.warnings().collect::<Vec<_>>()),
            ("Errors", self.errors().collect::<Vec<_>>()),
        ] {
            if items.is_empty() {
                continue;
            }
            lines.push(String::new());
            lines.push(format!("{}:", title));
            lines.extend(items.iter().map(|f| format!("  - {}", f)));
        }

        lines.push(String::new());
        lines.join("\n")
    }
}

pub struct Validator<'a> {
    rules: &'a RuleSet,
    refs: &'a ReferenceData,
}

impl<'a> Validator<'a> {
    pub fn new(rules: &'a RuleSet, refs: &'a ReferenceData) -> Self {
        Self { rules, refs }
    }

    pub fn validate(&self, log: &ParsedLog) -> ValidationResult {
        let callsign = log
            .header(&Tag::Callsign)
            .and_then(|v| v.first())
            .cloned()
            .unwrap_or_else(|| "UNKNOWN".to_string());

        let mut findings = self.check_headers(log);
        let mut total_contacts = 0;
        let mut invalid_contacts = 0;

        for (line, tokens) in log.contacts() {
            total_contacts += 1;
            let contact = self.check_contact(line, tokens);
            if contact.iter().any(Finding::is_error) {
                invalid_contacts += 1;
            }
            findings.extend(contact);
        }

        if total_contacts == 0 {
            findings.push(Finding::log(FindingKind::EmptyLog, "No QSOs found in log"));
        }

        let result = ValidationResult {
            callsign,
            findings,
            total_contacts,
            invalid_contacts,
        };
        debug!(
            "Validated {}: {} contacts, {} invalid, {}",
            result.callsign,
            total_contacts,
            invalid_contacts,
            if result.is_valid() { "VALID" } else { "INVALID" }
        );
        result
    }

    fn check_headers(&self, log: &ParsedLog) -> Vec<Finding> {
        let mut out = Vec::new();
        let missing = |what: &str| Finding::log(FindingKind::MissingHeader, what.to_string());
        let optional = |what: String| Finding::log(FindingKind::MissingOptionalHeader, what);

        for tag in [Tag::StartOfLog, Tag::EndOfLog] {
            if !log.has_tag(&tag) {
                out.push(missing(&format!("Missing {}", tag)));
            }
        }

        match log.header(&Tag::Callsign) {
            Some(v) if !v.is_empty() => {}
            _ => out.push(missing("Missing CALLSIGN")),
        }

        match log.header(&Tag::CategoryPower) {
            None => out.push(missing("Missing CATEGORY-POWER")),
            Some(v) if parse_power(v).is_none() => out.push(missing(
                "CATEGORY-POWER invalid (should be QRP, LOW, or HIGH)",
            )),
            Some(_) => {}
        }

        if matches!(log.header(&Tag::Email), Some(v) if v.is_empty()) {
            out.push(optional("EMAIL tag present but empty".to_string()));
        }

        if !log.has_tag(&Tag::CategoryOperator) {
            out.push(optional("Missing CATEGORY-OPERATOR".to_string()));
        }

        match log.header(&Tag::CategoryStation) {
            None => out.push(optional(
                "Missing CATEGORY-STATION, derived from contacts".to_string(),
            )),
            Some(v) if parse_station(v).is_none() => out.push(optional(format!(
                "CATEGORY-STATION '{}' not recognized, derived from contacts",
                v.join(" ")
            ))),
            Some(_) => {}
        }

        match log.header(&Tag::CategoryOverlay) {
            None => out.push(optional(
                "Missing CATEGORY-OVERLAY, no overlay applied".to_string(),
            )),
            Some(v) if !v.is_empty() && parse_overlay(v).is_none() => out.push(optional(format!(
                "CATEGORY-OVERLAY '{}' not recognized, no overlay applied",
                v.join(" ")
            ))),
            Some(_) => {}
        }

        out
    }

    /// Every finding for one contact line, in check order.
    fn check_contact(&self, line: usize, tokens: &[String]) -> Vec<Finding> {
        let mut out = Vec::new();
        let mut push = |kind: FindingKind, message: String| {
            out.push(Finding::contact(line, kind, message));
        };

        if tokens.len() != CONTACT_FIELDS {
            push(
                FindingKind::Malformed,
                format!(
                    "Missing or excess data in QSO line ({} fields, expected {})",
                    tokens.len(),
                    CONTACT_FIELDS
                ),
            );
            return out;
        }

        let (freq, mode, date, time) = (&tokens[1], &tokens[2], &tokens[3], &tokens[4]);

        if checks::band_of(self.rules, freq).is_none() {
            push(FindingKind::BadFrequency, format!("Invalid frequency: {} kHz", freq));
        }

        if checks::contest_mode(self.rules, mode).is_none() {
            push(FindingKind::BadMode, format!("Invalid mode: {}", mode));
        }

        let day = checks::contest_date(self.rules, date);
        if day.is_none() {
            push(FindingKind::BadDate, format!("Invalid or out-of-contest date: {}", date));
        }

        match checks::well_formed_time(time) {
            None => push(FindingKind::BadTime, format!("Invalid time format: {}", time)),
            Some(t) => {
                if let Some(d) = day {
                    if !self.rules.window_contains(d.and_time(t)) {
                        push(
                            FindingKind::BadTime,
                            format!("QSO outside contest period: {} {}", date, time),
                        );
                    }
                }
            }
        }

        for (side, call) in [(Side::Sent, &tokens[5]), (Side::Received, &tokens[8])] {
            if !callsign::is_valid_format(call) {
                push(
                    FindingKind::BadCallsign(side),
                    format!("Invalid {} callsign: {}", side, call),
                );
            }
        }

        for (side, call, location) in [
            (Side::Sent, &tokens[5], &tokens[7]),
            (Side::Received, &tokens[8], &tokens[10]),
        ] {
            if let Some((kind, message)) = self.check_location(side, call, location) {
                push(kind, message);
            }
        }

        out
    }

    /// `call` is the station that sent `location`.
    fn check_location(&self, side: Side, call: &str, location: &str) -> Option<(FindingKind, String)> {
        let bad = |why: &str| {
            Some((
                FindingKind::BadLocation(side),
                format!("Invalid {} QTH: {} ({})", side, location, why),
            ))
        };

        if !checks::location_shape_ok(location) {
            return bad("empty or numeric");
        }

        if !checks::is_multi_location(location) {
            if checks::known_location(self.rules, self.refs, location, call) {
                return None;
            }
            return bad("not a recognized location");
        }

        let parts: Vec<&str> = location.split('/').collect();
        let all_known = parts
            .iter()
            .all(|p| checks::location_shape_ok(p) && checks::known_location(self.rules, self.refs, p, call));
        if !all_known {
            return bad("multi-location part not recognized");
        }

        let note = match side {
            Side::Received => "will be split during preparation",
            Side::Sent => "sent locations are not split",
        };
        Some((
            FindingKind::MultiLocation(side),
            format!("{} QTH has slash (multi-location): {} - {}", side, location, note),
        ))
    }
}
