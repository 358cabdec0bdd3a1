pub mod category;
pub mod prepared;

use crate::cabrillo::{ContactRecord, Exchange, LogRecord, StationHeader};
use crate::callsign;
use crate::config::RuleSet;
use crate::error::{QpResult, QsoPartyError};
use crate::reference::ReferenceData;
use crate::types::{Band, CategoryAssignment, Mode, ModeClass};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One scoring-ready contact. A multi-location contact yields several of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalContact {
    /// Line of the contact this record came from.
    pub source_line: usize,
    pub band: Band,
    pub mode: Mode,
    pub mode_class: ModeClass,
    pub timestamp: NaiveDateTime,
    pub sent: Exchange,
    pub received: Exchange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedLog {
    /// Log identity used for ranking ties; the callsign unless set by the caller.
    pub id: String,
    pub header: StationHeader,
    pub category: CategoryAssignment,
    /// Contact lines in the submitted log, before splitting.
    pub logged_contacts: usize,
    pub contacts: Vec<CanonicalContact>,
}

impl NormalizedLog {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Which side of a contact gets the disambiguation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DxMark {
    None,
    Sent,
    Received,
}

/// Sent side wins when both sides qualify.
pub fn dx_mark(contact: &ContactRecord, rules: &RuleSet) -> DxMark {
    let qualifies =
        |x: &Exchange| callsign::is_foreign(&x.call, rules) && rules.is_ambiguous(&x.location);

    if qualifies(&contact.sent) {
        DxMark::Sent
    } else if qualifies(&contact.received) {
        DxMark::Received
    } else {
        DxMark::None
    }
}

/// Parts of a `/`-joined location in written order. Empty parts are dropped.
pub fn split_locations(location: &str) -> Vec<&str> {
    location.split('/').filter(|p| !p.is_empty()).collect()
}

pub struct Normalizer<'a> {
    rules: &'a RuleSet,
    refs: &'a ReferenceData,
}

impl<'a> Normalizer<'a> {
    pub fn new(rules: &'a RuleSet, refs: &'a ReferenceData) -> Self {
        Self { rules, refs }
    }

    /// Expects a log the validator accepted; any contact that still cannot be
    /// mapped is an invariant violation and fails the whole log.
    pub fn normalize(&self, log: &LogRecord) -> QpResult<NormalizedLog> {
        let category = category::derive_category(&log.header, &log.contacts, self.rules, self.refs);

        let mut contacts = Vec::with_capacity(log.contacts.len());
        for contact in &log.contacts {
            contacts.extend(self.canonicalize(contact)?);
        }

        debug!(
            "Normalized {}: {} contacts -> {} canonical, category {}",
            log.header.callsign,
            log.contacts.len(),
            contacts.len(),
            category.to_code()
        );

        Ok(NormalizedLog {
            id: log.header.callsign.clone(),
            header: log.header.clone(),
            category,
            logged_contacts: log.contacts.len(),
            contacts,
        })
    }

    fn canonicalize(&self, contact: &ContactRecord) -> QpResult<Vec<CanonicalContact>> {
        let violation = |what: String| {
            QsoPartyError::Invariant(format!("line {}: {}", contact.line, what))
        };

        let band = self
            .rules
            .band_or_passthrough(contact.frequency)
            .ok_or_else(|| violation(format!("frequency {} maps to no band", contact.frequency)))?;
        let mode_class = self
            .rules
            .mode_class(contact.mode)
            .ok_or_else(|| violation(format!("mode {} has no class", contact.mode)))?;

        let mark = dx_mark(contact, self.rules);
        let marked = |loc: &str, side: DxMark| {
            if mark == side {
                format!("{}{}", loc, self.rules.dx_marker)
            } else {
                loc.to_string()
            }
        };

        let sent = Exchange {
            call: callsign::canonical(&contact.sent.call).to_string(),
            report: contact.sent.report.clone(),
            location: marked(&contact.sent.location, DxMark::Sent),
        };
        let received_call = callsign::canonical(&contact.received.call).to_string();

        let parts = split_locations(&contact.received.location);
        if parts.is_empty() {
            return Err(violation(format!(
                "received location '{}' is empty",
                contact.received.location
            )));
        }

        Ok(parts
            .into_iter()
            .map(|loc| CanonicalContact {
                source_line: contact.line,
                band,
                mode: contact.mode,
                mode_class,
                timestamp: contact.timestamp,
                sent: sent.clone(),
                received: Exchange {
                    call: received_call.clone(),
                    report: contact.received.report.clone(),
                    location: marked(loc, DxMark::Received),
                },
            })
            .collect())
    }
}
