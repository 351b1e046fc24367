use thiserror::Error;

use crate::model::TeamId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeagueError {
    #[error("cannot schedule a season with {count} team(s); at least 2 are required")]
    NotEnoughTeams { count: usize },

    #[error("game references unknown team {0}")]
    UnknownTeam(TeamId),
}
