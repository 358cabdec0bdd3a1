use super::multipliers::MultiplierKey;
use crate::types::{Band, CategoryAssignment, Mode, ModeClass};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum BonusKind {
    #[strum(serialize = "Club station")]
    ClubContact,
    #[strum(serialize = "Rover activation")]
    RoverActivation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub kind: BonusKind,
    /// 1 for the club bonus, activated locations for the rover bonus.
    pub units: u32,
    pub points: u64,
}

/// Received locations worked, by classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedLocations {
    pub local: BTreeSet<String>,
    pub regional: BTreeSet<String>,
    pub foreign: BTreeSet<String>,
}

/// Contacts sent from and received from one Local location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationActivity {
    pub sent: u32,
    pub received: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub log_id: String,
    pub callsign: String,
    pub category: CategoryAssignment,

    pub total_contacts: usize,
    pub valid_contacts: usize,
    pub contacts_by_band: BTreeMap<Band, u32>,
    pub contacts_by_mode: BTreeMap<Mode, u32>,
    pub contacts_by_mode_class: BTreeMap<ModeClass, u32>,

    pub raw_points: u64,
    pub multipliers: BTreeSet<MultiplierKey>,
    pub bonuses: Vec<Bonus>,

    pub worked: WorkedLocations,
    pub activated: BTreeSet<String>,
    pub local_activity: BTreeMap<String, LocationActivity>,

    pub final_score: u64,
}

impl ScoreBreakdown {
    pub fn multiplier_count(&self) -> u64 {
        self.multipliers.len() as u64
    }

    pub fn bonus_points(&self) -> u64 {
        self.bonuses.iter().map(|b| b.points).sum()
    }

    pub fn bonus(&self, kind: BonusKind) -> Option<&Bonus> {
        self.bonuses.iter().find(|b| b.kind == kind)
    }
}
