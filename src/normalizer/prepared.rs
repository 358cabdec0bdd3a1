//! Text form of a normalized log: band numbers instead of kHz, canonical
//! calls, one line per split contact, and the category directive up front.

use super::{CanonicalContact, NormalizedLog};
use crate::cabrillo::log::parse_station;
use crate::cabrillo::{parse_log, ContactRecord, StationHeader, Tag, DATE_FORMAT, TIME_FORMAT};
use crate::config::RuleSet;
use crate::error::{QpResult, QsoPartyError};
use crate::types::CategoryAssignment;

/// Extension tag carrying the pre-split contact count.
pub const LOGGED_QSOS_TAG: &str = "X-QSOPARTY-LOGGED-QSOS";

impl NormalizedLog {
    pub fn render(&self) -> String {
        let h = &self.header;
        let mut lines = vec![
            format!("{}: 3.0", Tag::StartOfLog),
            format!("{}: {}", Tag::QsopartyCategory, self.category.to_code()),
            format!("{}: {}", LOGGED_QSOS_TAG, self.logged_contacts),
        ];

        if let Some(contest) = &h.contest {
            lines.push(format!("{}: {}", Tag::Contest, contest));
        }
        lines.push(format!("{}: {}", Tag::Callsign, h.callsign));
        if let Some(email) = &h.email {
            lines.push(format!("{}: {}", Tag::Email, email));
        }
        lines.push(format!("{}: {}", Tag::CategoryPower, h.power));
        if let Some(station) = h.station {
            lines.push(format!("{}: {}", Tag::CategoryStation, station));
        }
        if let Some(overlay) = h.overlay {
            lines.push(format!("{}: {}", Tag::CategoryOverlay, overlay));
        }
        if let Some(operator) = &h.operator {
            lines.push(format!("{}: {}", Tag::CategoryOperator, operator));
        }

        lines.extend(self.contacts.iter().map(render_contact));
        lines.push(format!("{}:", Tag::EndOfLog));
        lines.push(String::new());
        lines.join("\n")
    }
}

fn render_contact(c: &CanonicalContact) -> String {
    format!(
        "QSO: {} {} {} {} {} {} {} {} {} {}",
        c.band.meters(),
        c.mode,
        c.timestamp.format(DATE_FORMAT),
        c.timestamp.format(TIME_FORMAT),
        c.sent.call,
        c.sent.report,
        c.sent.location,
        c.received.call,
        c.received.report,
        c.received.location
    )
}

/// Reads text produced by `NormalizedLog::render`. Contacts are taken as they
/// stand: no splitting or marking is applied a second time.
pub fn read(text: &str, rules: &RuleSet) -> QpResult<NormalizedLog> {
    let parsed = parse_log(text);
    let first = |tag: &Tag| parsed.header(tag).and_then(|v| v.first()).cloned();
    let joined = |tag: &Tag| {
        parsed
            .header(tag)
            .map(|v| v.join(" "))
            .filter(|s| !s.is_empty())
    };

    let code = joined(&Tag::QsopartyCategory).ok_or_else(|| {
        QsoPartyError::Prepared(format!("missing {} directive", Tag::QsopartyCategory))
    })?;
    let category = CategoryAssignment::from_code(&code)?;

    let callsign = first(&Tag::Callsign)
        .ok_or_else(|| QsoPartyError::Prepared("missing CALLSIGN".to_string()))?;

    let mut contacts = Vec::new();
    for (line, tokens) in parsed.contacts() {
        let record = ContactRecord::from_tokens(line, tokens)
            .map_err(|e| QsoPartyError::Prepared(e.to_string()))?;
        let bad = |what: &str| QsoPartyError::Prepared(format!("line {}: {}", line, what));

        let band = rules
            .band_or_passthrough(record.frequency)
            .ok_or_else(|| bad("band not in the band plan"))?;
        let mode_class = rules
            .mode_class(record.mode)
            .ok_or_else(|| bad("mode has no scoring class"))?;

        contacts.push(CanonicalContact {
            source_line: line,
            band,
            mode: record.mode,
            mode_class,
            timestamp: record.timestamp,
            sent: record.sent,
            received: record.received,
        });
    }

    let logged_contacts = match first(&Tag::Other(LOGGED_QSOS_TAG.to_string())) {
        Some(n) => n
            .parse()
            .map_err(|_| QsoPartyError::Prepared(format!("{} '{}' is not a count", LOGGED_QSOS_TAG, n)))?,
        None => contacts.len(),
    };

    let header = StationHeader {
        email: joined(&Tag::Email),
        contest: joined(&Tag::Contest),
        power: category.power,
        station: parsed.header(&Tag::CategoryStation).and_then(parse_station),
        overlay: category.overlay,
        operator: joined(&Tag::CategoryOperator),
        callsign: callsign.clone(),
    };

    Ok(NormalizedLog {
        id: callsign,
        header,
        category,
        logged_contacts,
        contacts,
    })
}
