use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::model::{Game, StandingsRow, Team, TeamId};
use crate::tiebreak::{self, Criterion};

const WEIGHT_POINTS: f64 = 0.35;
const WEIGHT_POSITION: f64 = 0.25;
const WEIGHT_FORM: f64 = 0.20;
const WEIGHT_STRENGTH: f64 = 0.20;

const MIN_CATCHUP_PENALTY: f64 = 0.1;
const NEUTRAL_FORM: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonPhase {
    PreSeason,
    InProgress,
    Complete,
}

impl SeasonPhase {
    pub fn detect(completed: &[Game], scheduled: &[Game]) -> Self {
        if completed.is_empty() {
            SeasonPhase::PreSeason
        } else if scheduled.is_empty() {
            SeasonPhase::Complete
        } else {
            SeasonPhase::InProgress
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChampionshipForecast {
    pub phase: SeasonPhase,
    /// Title chance per team, in percent.
    pub odds: BTreeMap<TeamId, f64>,
    /// Teams still level after every tiebreak criterion at season end. The first of
    /// them in roster order is awarded the title; anything non-empty deserves a look.
    pub unresolved_tie: Vec<TeamId>,
}

impl ChampionshipForecast {
    pub fn favourite(&self) -> Option<(TeamId, f64)> {
        self.odds
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
            .map(|(id, p)| (*id, *p))
    }
}

pub fn predict_championship(
    teams: &[Team],
    standings: &[StandingsRow],
    completed: &[Game],
    scheduled: &[Game],
) -> ChampionshipForecast {
    let phase = SeasonPhase::detect(completed, scheduled);
    let mut unresolved_tie = Vec::new();
    let odds = match phase {
        SeasonPhase::PreSeason => preseason_odds(teams),
        SeasonPhase::Complete => {
            let (odds, tie) = final_odds(teams, standings, completed);
            unresolved_tie = tie;
            odds
        }
        SeasonPhase::InProgress => in_progress_odds(teams, standings, scheduled),
    };
    ChampionshipForecast {
        phase,
        odds,
        unresolved_tie,
    }
}

fn preseason_odds(teams: &[Team]) -> BTreeMap<TeamId, f64> {
    let total: f64 = teams.iter().map(|t| f64::from(t.strength)).sum();
    let shares: Vec<(TeamId, f64)> = teams
        .iter()
        .map(|t| {
            let share = if total > 0.0 {
                f64::from(t.strength)
            } else {
                1.0
            };
            (t.id, share)
        })
        .collect();
    percentages(shares)
}

fn rows_by_team(standings: &[StandingsRow]) -> HashMap<TeamId, StandingsRow> {
    standings.iter().map(|r| (r.team_id, *r)).collect()
}

fn row_for(rows: &HashMap<TeamId, StandingsRow>, team_id: TeamId) -> StandingsRow {
    rows.get(&team_id)
        .copied()
        .unwrap_or_else(|| StandingsRow::empty(team_id))
}

fn leader_points(teams: &[Team], rows: &HashMap<TeamId, StandingsRow>) -> u32 {
    teams
        .iter()
        .map(|t| row_for(rows, t.id).points)
        .max()
        .unwrap_or(0)
}

fn final_odds(
    teams: &[Team],
    standings: &[StandingsRow],
    completed: &[Game],
) -> (BTreeMap<TeamId, f64>, Vec<TeamId>) {
    let rows = rows_by_team(standings);
    let top = leader_points(teams, &rows);
    let tied: Vec<TeamId> = teams
        .iter()
        .filter(|t| row_for(&rows, t.id).points == top)
        .map(|t| t.id)
        .collect();

    let (champion, unresolved) = match tied.as_slice() {
        [] => (None, Vec::new()),
        [only] => (Some(*only), Vec::new()),
        _ => resolve_tie(&tied, &rows, completed),
    };

    let odds = teams
        .iter()
        .map(|t| {
            let p = if Some(t.id) == champion { 100.0 } else { 0.0 };
            (t.id, p)
        })
        .collect();
    (odds, unresolved)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TiebreakStats {
    team_id: TeamId,
    h2h_points: u32,
    h2h_goal_diff: i64,
    h2h_goals: u32,
    goal_diff: i64,
    goals_for: u32,
}

fn compare_h2h_points(a: &TiebreakStats, b: &TiebreakStats) -> Ordering {
    b.h2h_points.cmp(&a.h2h_points)
}

fn compare_h2h_goal_diff(a: &TiebreakStats, b: &TiebreakStats) -> Ordering {
    b.h2h_goal_diff.cmp(&a.h2h_goal_diff)
}

fn compare_h2h_goals(a: &TiebreakStats, b: &TiebreakStats) -> Ordering {
    b.h2h_goals.cmp(&a.h2h_goals)
}

fn compare_goal_diff(a: &TiebreakStats, b: &TiebreakStats) -> Ordering {
    b.goal_diff.cmp(&a.goal_diff)
}

fn compare_goals_for(a: &TiebreakStats, b: &TiebreakStats) -> Ordering {
    b.goals_for.cmp(&a.goals_for)
}

// Highest priority first.
const TIEBREAK_CRITERIA: [Criterion<TiebreakStats>; 5] = [
    compare_h2h_points,
    compare_h2h_goal_diff,
    compare_h2h_goals,
    compare_goal_diff,
    compare_goals_for,
];

fn resolve_tie(
    tied: &[TeamId],
    rows: &HashMap<TeamId, StandingsRow>,
    completed: &[Game],
) -> (Option<TeamId>, Vec<TeamId>) {
    let mut stats: Vec<TiebreakStats> = tied
        .iter()
        .map(|id| head_to_head_stats(*id, tied, rows, completed))
        .collect();
    tiebreak::rank_by(&mut stats, &TIEBREAK_CRITERIA);

    let Some(first) = stats.first().copied() else {
        return (None, Vec::new());
    };
    let still_level: Vec<TeamId> = stats
        .iter()
        .filter(|s| tiebreak::cascade(&TIEBREAK_CRITERIA, &first, s) == Ordering::Equal)
        .map(|s| s.team_id)
        .collect();
    let unresolved = if still_level.len() > 1 {
        still_level
    } else {
        Vec::new()
    };
    (Some(first.team_id), unresolved)
}

fn head_to_head_stats(
    team_id: TeamId,
    group: &[TeamId],
    rows: &HashMap<TeamId, StandingsRow>,
    completed: &[Game],
) -> TiebreakStats {
    let group: HashSet<TeamId> = group.iter().copied().collect();
    let row = row_for(rows, team_id);
    let mut stats = TiebreakStats {
        team_id,
        goal_diff: row.goal_difference(),
        goals_for: row.goals_for,
        ..TiebreakStats::default()
    };

    for game in completed {
        let opponent = if game.home_team_id == team_id {
            game.away_team_id
        } else if game.away_team_id == team_id {
            game.home_team_id
        } else {
            continue;
        };
        if opponent == team_id || !group.contains(&opponent) {
            continue;
        }
        let Some((scored, conceded)) = game.goals_for_team(team_id) else {
            continue;
        };
        stats.h2h_goals += u32::from(scored);
        stats.h2h_goal_diff += i64::from(scored) - i64::from(conceded);
        stats.h2h_points += match scored.cmp(&conceded) {
            Ordering::Greater => 3,
            Ordering::Equal => 1,
            Ordering::Less => 0,
        };
    }
    stats
}

fn in_progress_odds(
    teams: &[Team],
    standings: &[StandingsRow],
    scheduled: &[Game],
) -> BTreeMap<TeamId, f64> {
    let rows = rows_by_team(standings);
    let leader = leader_points(teams, &rows);

    let raw: Vec<(TeamId, f64)> = teams
        .iter()
        .map(|team| {
            let row = row_for(&rows, team.id);
            let remaining = scheduled.iter().filter(|g| g.involves(team.id)).count() as u32;
            (team.id, contender_score(team, &row, leader, remaining))
        })
        .collect();

    let total: f64 = raw.iter().map(|(_, score)| score).sum();
    if total <= 0.0 {
        return raw.into_iter().collect();
    }
    percentages(raw)
}

/// Un-normalized title score for one team; 0.0 once the leader is out of reach.
fn contender_score(team: &Team, row: &StandingsRow, leader_points: u32, remaining: u32) -> f64 {
    let max_possible = row.points + remaining * 3;
    if max_possible < leader_points {
        return 0.0;
    }

    let gap = f64::from(leader_points - row.points);
    let reachable = nonzero(f64::from(remaining * 3));

    let points_factor = f64::from(row.points) / nonzero(f64::from(leader_points));
    let position_factor = 1.0 - gap / reachable;
    let strength_factor = f64::from(team.strength) / 100.0;

    let weighted = points_factor * WEIGHT_POINTS
        + position_factor * WEIGHT_POSITION
        + form_factor(row) * WEIGHT_FORM
        + strength_factor * WEIGHT_STRENGTH;

    let catchup_penalty = (1.0 - gap / reachable).max(MIN_CATCHUP_PENALTY);
    weighted * catchup_penalty * 100.0
}

/// Blend of win ratio and per-game goal difference, in [0, 1].
pub fn form_factor(row: &StandingsRow) -> f64 {
    if row.played == 0 {
        return NEUTRAL_FORM;
    }
    let per_game = row.goal_difference() as f64 / f64::from(row.played);
    let goal_factor = (per_game / 3.0).clamp(-0.5, 0.5);
    ((row.win_ratio() + goal_factor + 1.0) / 2.0).clamp(0.0, 1.0)
}

fn nonzero(v: f64) -> f64 {
    if v == 0.0 { 1.0 } else { v }
}

/// Each weight's share of the total as a percentage rounded to one decimal. Sums can
/// drift from 100.0 by the rounding of each entry.
fn percentages(weights: Vec<(TeamId, f64)>) -> BTreeMap<TeamId, f64> {
    let total: f64 = weights.iter().map(|(_, w)| w.max(0.0)).sum();
    weights
        .into_iter()
        .map(|(id, w)| {
            let share = if total > 0.0 { w.max(0.0) / total } else { 0.0 };
            (id, round1(share * 100.0))
        })
        .collect()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
