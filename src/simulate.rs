use std::collections::HashMap;

use log::debug;
use rand::Rng;

use crate::error::LeagueError;
use crate::model::{Game, StandingsRow, Team, TeamId};
use crate::score_model::{ScoreModel, SideProfile};

/// Rating and current form for every team, keyed by id.
pub fn side_profiles(teams: &[Team], standings: &[StandingsRow]) -> HashMap<TeamId, SideProfile> {
    let rows: HashMap<TeamId, &StandingsRow> = standings.iter().map(|r| (r.team_id, r)).collect();
    teams
        .iter()
        .map(|team| {
            let win_ratio = rows.get(&team.id).map(|r| r.win_ratio()).unwrap_or(0.0);
            (
                team.id,
                SideProfile {
                    strength: f64::from(team.strength),
                    win_ratio,
                },
            )
        })
        .collect()
}

/// Plays every scheduled game of `week` and returns them completed.
///
/// Games from other weeks, or already completed ones, are ignored. An empty result means
/// there was nothing to play; reporting that is up to the caller.
pub fn simulate_week<R: Rng + ?Sized>(
    week: u32,
    games: &[Game],
    profiles: &HashMap<TeamId, SideProfile>,
    model: &ScoreModel,
    rng: &mut R,
) -> Result<Vec<Game>, LeagueError> {
    let mut played = Vec::new();
    for game in games.iter().filter(|g| g.week == week && g.is_scheduled()) {
        let home = *profiles
            .get(&game.home_team_id)
            .ok_or(LeagueError::UnknownTeam(game.home_team_id))?;
        let away = *profiles
            .get(&game.away_team_id)
            .ok_or(LeagueError::UnknownTeam(game.away_team_id))?;

        let score = model.sample(home, away, rng);
        debug!(
            "week {week}: game {} {} {}-{} {}",
            game.id, game.home_team_id, score.home, score.away, game.away_team_id
        );
        played.push(game.clone().complete(score.home, score.away));
    }
    Ok(played)
}
