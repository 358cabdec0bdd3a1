pub mod multipliers;
pub mod types;

pub use self::multipliers::MultiplierKey;
pub use self::types::{Bonus, BonusKind, LocationActivity, ScoreBreakdown, WorkedLocations};

use crate::config::RuleSet;
use crate::error::QpResult;
use crate::normalizer::category::local_sent_locations;
use crate::normalizer::{prepared, NormalizedLog};
use crate::reference::ReferenceData;
use crate::types::{LocationClass, LocationKind};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub struct Scorer<'a> {
    rules: &'a RuleSet,
    refs: &'a ReferenceData,
}

impl<'a> Scorer<'a> {
    pub fn new(rules: &'a RuleSet, refs: &'a ReferenceData) -> Self {
        Self { rules, refs }
    }

    pub fn score(&self, log: &NormalizedLog) -> ScoreBreakdown {
        let class = log.category.location;

        let mut by_band = BTreeMap::new();
        let mut by_mode = BTreeMap::new();
        let mut by_mode_class = BTreeMap::new();
        let mut multipliers = BTreeSet::new();
        let mut worked = WorkedLocations::default();
        let mut local_activity: BTreeMap<String, LocationActivity> = BTreeMap::new();
        let mut raw_points = 0u64;
        let mut worked_club = false;

        for c in &log.contacts {
            *by_band.entry(c.band).or_insert(0) += 1;
            *by_mode.entry(c.mode).or_insert(0) += 1;
            *by_mode_class.entry(c.mode_class).or_insert(0) += 1;
            raw_points += u64::from(self.rules.points_for(c.mode_class));

            let location = &c.received.location;
            let kind = self.refs.classify(location);
            match kind {
                LocationKind::Local => worked.local.insert(location.clone()),
                LocationKind::Regional => worked.regional.insert(location.clone()),
                LocationKind::Foreign => worked.foreign.insert(location.clone()),
            };

            if multipliers::is_eligible(class, kind) {
                multipliers.insert(MultiplierKey {
                    band: c.band,
                    mode_class: c.mode_class,
                    location: location.clone(),
                });
            }

            if c.received.call == self.rules.club_callsign {
                worked_club = true;
            }

            if kind == LocationKind::Local {
                local_activity.entry(location.clone()).or_default().received += 1;
            }
            for sent in local_sent_locations([c.sent.location.as_str()], self.refs) {
                local_activity.entry(sent).or_default().sent += 1;
            }
        }

        let mut bonuses = Vec::new();
        if worked_club {
            bonuses.push(Bonus {
                kind: BonusKind::ClubContact,
                units: 1,
                points: u64::from(self.rules.club_bonus),
            });
        }

        let activated = if class == LocationClass::LocalRover {
            local_sent_locations(log.contacts.iter().map(|c| c.sent.location.as_str()), self.refs)
        } else {
            BTreeSet::new()
        };
        if !activated.is_empty() {
            let units = activated.len() as u32;
            bonuses.push(Bonus {
                kind: BonusKind::RoverActivation,
                units,
                points: u64::from(units) * u64::from(self.rules.rover_location_bonus),
            });
        }

        let final_score = raw_points * multipliers.len() as u64
            + bonuses.iter().map(|b| b.points).sum::<u64>();

        debug!(
            "Scored {}: {} points x {} mults + {} bonus = {}",
            log.id,
            raw_points,
            multipliers.len(),
            final_score - raw_points * multipliers.len() as u64,
            final_score
        );

        ScoreBreakdown {
            log_id: log.id.clone(),
            callsign: log.header.callsign.clone(),
            category: log.category,
            total_contacts: log.logged_contacts,
            valid_contacts: log.contacts.len(),
            contacts_by_band: by_band,
            contacts_by_mode: by_mode,
            contacts_by_mode_class: by_mode_class,
            raw_points,
            multipliers,
            bonuses,
            worked,
            activated,
            local_activity,
            final_score,
        }
    }

    /// Scores the text form written by `NormalizedLog::render`.
    pub fn score_prepared(&self, text: &str) -> QpResult<ScoreBreakdown> {
        let log = prepared::read(text, self.rules)?;
        Ok(self.score(&log))
    }
}
