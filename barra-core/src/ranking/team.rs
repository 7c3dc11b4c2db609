//! Team standings from category positions.
//!
//! Each athlete in scope earns points from a positional table according to
//! their total position in their category (disqualified = 0). A team scores
//! its best `counted_athletes` athletes. Standings are only valid when enough
//! named teams are present. Athletes without a team are listed in their own
//! bucket, after every named team and without a position.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{EntryId, Equipment, Modality};

use crate::scoring::ModalityResult;

use super::category::{rank_category, Category, RankedResult};
use super::order::descending;

/// Points for positions 1..=10; every position after the table earns the last
/// value.
pub const DEFAULT_POINT_TABLE: [u32; 10] = [12, 9, 8, 7, 6, 5, 4, 3, 2, 1];
pub const DEFAULT_COUNTED_ATHLETES: usize = 5;
pub const DEFAULT_MIN_TEAMS: usize = 3;

/// Positional point table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointTable(Vec<u32>);

impl PointTable {
    pub fn new(points: Vec<u32>) -> Self {
        Self(points)
    }

    /// Points for a 1-based position; 0 (unranked) earns nothing.
    pub fn points_for(&self, position: u32) -> u32 {
        if position == 0 {
            return 0;
        }
        let idx = position as usize - 1;
        self.0
            .get(idx)
            .or_else(|| self.0.last())
            .copied()
            .unwrap_or(0)
    }

    /// Points for the given podium slot (1, 2 or 3), if the table has one.
    pub fn podium(&self, place: usize) -> Option<u32> {
        place.checked_sub(1).and_then(|i| self.0.get(i)).copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Default for PointTable {
    fn default() -> Self {
        Self(DEFAULT_POINT_TABLE.to_vec())
    }
}

/// Which results a team ranking covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScope {
    /// Division token, normally the open division.
    pub division: String,
    pub equipment: Equipment,
    /// When set, only entries whose resolved modality set is exactly this
    /// one modality count.
    #[serde(default)]
    pub modality: Option<Modality>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRules {
    pub point_table: PointTable,
    pub counted_athletes: usize,
    pub min_teams: usize,
}

impl Default for TeamRules {
    fn default() -> Self {
        Self {
            point_table: PointTable::default(),
            counted_athletes: DEFAULT_COUNTED_ATHLETES,
            min_teams: DEFAULT_MIN_TEAMS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAthlete {
    pub entry_id: EntryId,
    pub name: String,
    pub modality: Modality,
    pub weight_class: String,
    /// Total position in the athlete's category; 0 when disqualified.
    pub position: u32,
    pub team_points: u32,
    pub point_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamScore {
    /// 1-based standing among named teams; 0 for the no-team bucket and when
    /// the standings are not valid.
    pub position: u32,
    /// `None` is the bucket for athletes without a team.
    pub team: Option<String>,
    /// Counted athletes, best first.
    pub athletes: Vec<TeamAthlete>,
    pub total_points: u32,
    pub first_places: u32,
    pub second_places: u32,
    pub third_places: u32,
    pub total_point_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStandings {
    pub scope: TeamScope,
    pub teams: Vec<TeamScore>,
    /// Named teams in scope; the no-team bucket is not counted.
    pub team_count: usize,
    pub is_valid: bool,
}

/// Compute team standings for one scope from ranked categories.
pub fn score_teams(categories: &[Category], scope: &TeamScope, rules: &TeamRules) -> TeamStandings {
    let mut by_team: BTreeMap<Option<String>, Vec<TeamAthlete>> = BTreeMap::new();

    for category in categories {
        if category.key.division != scope.division || category.key.equipment != scope.equipment {
            continue;
        }
        let rescoped;
        let members: &[RankedResult] = match scope.modality {
            Some(only) => {
                rescoped = rank_in_scope(category, only);
                &rescoped
            }
            None => &category.results,
        };
        for ranked in members {
            let result = &ranked.result;
            let position = ranked.positions.total;
            by_team
                .entry(result.entry.team_name().map(str::to_string))
                .or_default()
                .push(TeamAthlete {
                    entry_id: result.entry.id,
                    name: result.entry.name.clone(),
                    modality: result.modality,
                    weight_class: result.entry.weight_class.clone(),
                    position,
                    team_points: rules.point_table.points_for(position),
                    point_score: result.point_score,
                });
        }
    }

    let mut teams: Vec<TeamScore> = by_team
        .into_iter()
        .map(|(team, athletes)| team_score(team, athletes, rules))
        .collect();
    teams.sort_by(|a, b| {
        a.team
            .is_none()
            .cmp(&b.team.is_none())
            .then_with(|| compare_teams(a, b))
    });

    let team_count = teams.iter().filter(|t| t.team.is_some()).count();
    let is_valid = team_count >= rules.min_teams;
    for (i, team) in teams.iter_mut().filter(|t| t.team.is_some()).enumerate() {
        team.position = if is_valid { i as u32 + 1 } else { 0 };
    }

    debug!(
        division = %scope.division,
        equipment = %scope.equipment,
        modality = ?scope.modality,
        team_count,
        is_valid,
        "scored teams"
    );

    TeamStandings {
        scope: scope.clone(),
        teams,
        team_count,
        is_valid,
    }
}

/// Keep only entries whose resolved modality set is exactly `only` and rank
/// them among themselves.
fn rank_in_scope(category: &Category, only: Modality) -> Vec<RankedResult> {
    let members: Vec<ModalityResult> = category
        .results
        .iter()
        .map(|ranked| &ranked.result)
        .filter(|result| result.entry_modalities.as_slice() == [only])
        .cloned()
        .collect();
    rank_category(category.key.clone(), members).results
}

fn team_score(
    team: Option<String>,
    mut athletes: Vec<TeamAthlete>,
    rules: &TeamRules,
) -> TeamScore {
    athletes.sort_by(|a, b| {
        b.team_points
            .cmp(&a.team_points)
            .then_with(|| descending(a.point_score, b.point_score))
            .then_with(|| a.entry_id.cmp(&b.entry_id))
    });
    athletes.truncate(rules.counted_athletes);

    let podium_count = |place: usize| -> u32 {
        rules
            .point_table
            .podium(place)
            .map(|pts| athletes.iter().filter(|a| a.team_points == pts).count() as u32)
            .unwrap_or(0)
    };

    TeamScore {
        position: 0,
        total_points: athletes.iter().map(|a| a.team_points).sum(),
        first_places: podium_count(1),
        second_places: podium_count(2),
        third_places: podium_count(3),
        total_point_score: athletes.iter().map(|a| a.point_score).sum(),
        team,
        athletes,
    }
}

/// Total points, then first/second/third places, then summed point score,
/// all descending. Remaining ties fall back to team name.
fn compare_teams(a: &TeamScore, b: &TeamScore) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then(b.first_places.cmp(&a.first_places))
        .then(b.second_places.cmp(&a.second_places))
        .then(b.third_places.cmp(&a.third_places))
        .then_with(|| descending(a.total_point_score, b.total_point_score))
        .then_with(|| a.team.cmp(&b.team))
}
