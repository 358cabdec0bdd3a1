use crate::types::{Band, LocationClass, LocationKind, ModeClass};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One multiplier: a location worked on a band in a mode class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MultiplierKey {
    pub band: Band,
    pub mode_class: ModeClass,
    pub location: String,
}

impl fmt::Display for MultiplierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.band, self.mode_class, self.location)
    }
}

/// Stations outside the contest region only count Local locations;
/// Local stations count everything they work.
pub fn is_eligible(log: LocationClass, worked: LocationKind) -> bool {
    log.is_local() || worked == LocationKind::Local
}
