use crate::reference::ReferenceData;
use crate::scorer::{LocationActivity, ScoreBreakdown};
use crate::types::{Band, LocationClass, Mode, ModeClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contest-wide activity over all accepted logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestStatistics {
    pub total_logs: usize,
    pub logs_by_location: BTreeMap<LocationClass, u32>,
    /// Keyed by award group short name; overlay entrants count in both groups.
    pub logs_by_group: BTreeMap<String, u32>,
    pub contacts_by_group: BTreeMap<String, u64>,

    pub total_contacts: u64,
    pub valid_contacts: u64,
    pub contacts_by_band: BTreeMap<Band, u64>,
    pub contacts_by_mode: BTreeMap<Mode, u64>,
    pub contacts_by_mode_class: BTreeMap<ModeClass, u64>,

    pub local_activity: BTreeMap<String, LocationActivity>,
}

impl ContestStatistics {
    pub fn collect(scores: &[ScoreBreakdown]) -> Self {
        let mut stats = Self {
            total_logs: scores.len(),
            ..Self::default()
        };

        for s in scores {
            *stats.logs_by_location.entry(s.category.location).or_insert(0) += 1;
            for group in s.category.groups() {
                let name = group.short_name();
                *stats.logs_by_group.entry(name.clone()).or_insert(0) += 1;
                *stats.contacts_by_group.entry(name).or_insert(0) += s.valid_contacts as u64;
            }

            stats.total_contacts += s.total_contacts as u64;
            stats.valid_contacts += s.valid_contacts as u64;
            for (band, n) in &s.contacts_by_band {
                *stats.contacts_by_band.entry(*band).or_insert(0) += u64::from(*n);
            }
            for (mode, n) in &s.contacts_by_mode {
                *stats.contacts_by_mode.entry(*mode).or_insert(0) += u64::from(*n);
            }
            for (class, n) in &s.contacts_by_mode_class {
                *stats.contacts_by_mode_class.entry(*class).or_insert(0) += u64::from(*n);
            }
            for (code, a) in &s.local_activity {
                let total = stats.local_activity.entry(code.clone()).or_default();
                total.sent += a.sent;
                total.received += a.received;
            }
        }

        stats
    }

    /// Local locations that appear in any contact, either side.
    pub fn active_locations(&self) -> usize {
        self.local_activity
            .values()
            .filter(|a| a.sent > 0 || a.received > 0)
            .count()
    }

    pub fn sent_from_locations(&self) -> usize {
        self.local_activity.values().filter(|a| a.sent > 0).count()
    }

    pub fn worked_locations(&self) -> usize {
        self.local_activity.values().filter(|a| a.received > 0).count()
    }

    /// Local codes nobody sent from or worked.
    pub fn inactive_locations<'r>(&self, refs: &'r ReferenceData) -> Vec<&'r str> {
        refs.local_codes()
            .filter(|code| {
                self.local_activity
                    .get(*code)
                    .map_or(true, |a| a.sent == 0 && a.received == 0)
            })
            .collect()
    }
}
