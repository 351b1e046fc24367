use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::{Game, StandingsRow, TeamId};

/// Replays every completed game into a fresh table, one row per team that has played.
///
/// Scheduled games are skipped. The output is keyed and sorted by team id, so the same
/// history always produces the same rows regardless of input order.
pub fn recalculate_standings(games: &[Game]) -> Vec<StandingsRow> {
    fold_results(BTreeMap::new(), games)
}

/// Same as [`recalculate_standings`], but every rostered team gets a row even before its
/// first game, and the rows come back in table order.
pub fn league_table(team_ids: &[TeamId], games: &[Game]) -> Vec<StandingsRow> {
    let seed = team_ids
        .iter()
        .map(|id| (*id, StandingsRow::empty(*id)))
        .collect();
    let mut rows = fold_results(seed, games);
    sort_table(&mut rows);
    rows
}

/// Points, then goal difference, then goals scored; team id keeps it total.
pub fn sort_table(rows: &mut [StandingsRow]) {
    rows.sort_by(table_order);
}

fn table_order(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

fn fold_results(mut rows: BTreeMap<TeamId, StandingsRow>, games: &[Game]) -> Vec<StandingsRow> {
    for game in games {
        let Some((home, away)) = game.score() else {
            continue;
        };
        rows.entry(game.home_team_id)
            .or_insert_with(|| StandingsRow::empty(game.home_team_id))
            .record(home, away);
        rows.entry(game.away_team_id)
            .or_insert_with(|| StandingsRow::empty(game.away_team_id))
            .record(away, home);
    }
    rows.into_values().collect()
}
