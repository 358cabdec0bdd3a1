pub mod ranking;
pub mod stats;

pub use self::ranking::{GroupStanding, Placement, RankingEntry};
pub use self::stats::ContestStatistics;

use crate::scorer::ScoreBreakdown;
use crate::types::AwardGroup;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestResults {
    pub overall: Vec<RankingEntry>,
    /// Only groups with at least one entrant, in award order.
    pub groups: Vec<GroupStanding>,
    pub statistics: ContestStatistics,
}

impl ContestResults {
    pub fn group(&self, group: &AwardGroup) -> Option<&GroupStanding> {
        self.groups.iter().find(|g| g.group == *group)
    }

    pub fn entry(&self, log_id: &str) -> Option<&RankingEntry> {
        self.overall.iter().find(|e| e.log_id == log_id)
    }
}

/// Needs the complete set of accepted logs; input order does not matter.
pub fn aggregate(scores: &[ScoreBreakdown]) -> ContestResults {
    let (overall, groups) = ranking::rank(scores);
    ContestResults {
        overall,
        groups,
        statistics: ContestStatistics::collect(scores),
    }
}
