use std::collections::BTreeSet;

use crate::model::Game;

/// Lowest week that still has a scheduled game. Once everything is played this is the
/// last week of the season, and 1 when there is no schedule at all.
pub fn current_week(games: &[Game]) -> u32 {
    games
        .iter()
        .filter(|g| g.is_scheduled())
        .map(|g| g.week)
        .min()
        .or_else(|| games.iter().map(|g| g.week).max())
        .unwrap_or(1)
}

pub fn has_scheduled_games_for_week(games: &[Game], week: u32) -> bool {
    games.iter().any(|g| g.week == week && g.is_scheduled())
}

/// Weeks that still have at least one scheduled game, ascending.
pub fn scheduled_weeks(games: &[Game]) -> Vec<u32> {
    games
        .iter()
        .filter(|g| g.is_scheduled())
        .map(|g| g.week)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn split_by_status(games: &[Game]) -> (Vec<Game>, Vec<Game>) {
    games.iter().cloned().partition(Game::is_completed)
}
