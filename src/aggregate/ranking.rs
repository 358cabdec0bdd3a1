use crate::scorer::ScoreBreakdown;
use crate::types::{AwardGroup, CategoryAssignment};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub log_id: String,
    pub callsign: String,
    pub final_score: u64,
    pub category: CategoryAssignment,
    pub overall_rank: usize,
    /// Rank within the base award group.
    pub category_rank: usize,
    /// Rank within the overlay group, for overlay entrants.
    pub overlay_rank: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub rank: usize,
    pub log_id: String,
    pub callsign: String,
    pub final_score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub group: AwardGroup,
    pub short_name: String,
    pub name: String,
    pub placements: Vec<Placement>,
}

/// Score descending, then callsign, then log id. The category code only
/// separates otherwise identical entries.
pub fn standing_order(a: &ScoreBreakdown, b: &ScoreBreakdown) -> Ordering {
    b.final_score
        .cmp(&a.final_score)
        .then_with(|| a.callsign.cmp(&b.callsign))
        .then_with(|| a.log_id.cmp(&b.log_id))
        .then_with(|| a.category.to_code().cmp(&b.category.to_code()))
}

/// Ranks are sequential positions starting at 1; ties never share a rank.
pub fn rank(scores: &[ScoreBreakdown]) -> (Vec<RankingEntry>, Vec<GroupStanding>) {
    let mut ordered: Vec<&ScoreBreakdown> = scores.iter().collect();
    ordered.sort_by(|a, b| standing_order(a, b));

    let mut members: BTreeMap<AwardGroup, Vec<Placement>> = BTreeMap::new();
    let mut overall = Vec::with_capacity(ordered.len());

    for (i, s) in ordered.iter().enumerate() {
        let mut place_in = |group: AwardGroup| {
            let list = members.entry(group).or_default();
            let rank = list.len() + 1;
            list.push(Placement {
                rank,
                log_id: s.log_id.clone(),
                callsign: s.callsign.clone(),
                final_score: s.final_score,
            });
            rank
        };

        let category_rank = place_in(s.category.base_group());
        let overlay_rank = s.category.overlay_group().map(&mut place_in);

        overall.push(RankingEntry {
            log_id: s.log_id.clone(),
            callsign: s.callsign.clone(),
            final_score: s.final_score,
            category: s.category,
            overall_rank: i + 1,
            category_rank,
            overlay_rank,
        });
    }

    let groups = members
        .into_iter()
        .map(|(group, placements)| GroupStanding {
            short_name: group.short_name(),
            name: group.full_name(),
            group,
            placements,
        })
        .collect();

    (overall, groups)
}
