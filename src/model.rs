use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type TeamId = u32;
pub type GameId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub country: String,
    pub logo: String,
    // 0..=100
    pub strength: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    Scheduled,
    Completed { home_score: u8, away_score: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub week: u32,
    pub match_date: NaiveDate,
    #[serde(flatten)]
    pub status: GameStatus,
}

impl Game {
    pub fn scheduled(
        id: GameId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        week: u32,
        match_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            home_team_id,
            away_team_id,
            week,
            match_date,
            status: GameStatus::Scheduled,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self.status, GameStatus::Scheduled)
    }

    pub fn is_completed(&self) -> bool {
        !self.is_scheduled()
    }

    /// `(home, away)` once the game has been played.
    pub fn score(&self) -> Option<(u8, u8)> {
        match self.status {
            GameStatus::Scheduled => None,
            GameStatus::Completed {
                home_score,
                away_score,
            } => Some((home_score, away_score)),
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Goals scored and conceded by `team_id`, if it took part and the game is completed.
    pub fn goals_for_team(&self, team_id: TeamId) -> Option<(u8, u8)> {
        let (home, away) = self.score()?;
        if self.home_team_id == team_id {
            Some((home, away))
        } else if self.away_team_id == team_id {
            Some((away, home))
        } else {
            None
        }
    }

    /// Scheduled -> completed. A completed game keeps its original result.
    pub fn complete(mut self, home_score: u8, away_score: u8) -> Self {
        if self.is_scheduled() {
            self.status = GameStatus::Completed {
                home_score,
                away_score,
            };
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team_id: TeamId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl StandingsRow {
    pub fn empty(team_id: TeamId) -> Self {
        Self {
            team_id,
            ..Self::default()
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    pub fn win_ratio(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            f64::from(self.won) / f64::from(self.played)
        }
    }

    pub(crate) fn record(&mut self, goals_for: u8, goals_against: u8) {
        self.played += 1;
        self.goals_for += u32::from(goals_for);
        self.goals_against += u32::from(goals_against);
        if goals_for > goals_against {
            self.won += 1;
            self.points += 3;
        } else if goals_for == goals_against {
            self.drawn += 1;
            self.points += 1;
        } else {
            self.lost += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    #[test]
    fn completing_a_game_is_one_way() {
        let game = Game::scheduled(1, 10, 20, 1, date()).complete(2, 1);
        assert_eq!(game.score(), Some((2, 1)));
        let again = game.complete(0, 0);
        assert_eq!(again.score(), Some((2, 1)));
    }

    #[test]
    fn goals_for_team_flips_for_away_side() {
        let game = Game::scheduled(1, 10, 20, 1, date()).complete(3, 1);
        assert_eq!(game.goals_for_team(10), Some((3, 1)));
        assert_eq!(game.goals_for_team(20), Some((1, 3)));
        assert_eq!(game.goals_for_team(30), None);
    }

    #[test]
    fn record_keeps_row_invariants() {
        let mut row = StandingsRow::empty(1);
        row.record(2, 0);
        row.record(1, 1);
        row.record(0, 4);
        assert_eq!(row.played, row.won + row.drawn + row.lost);
        assert_eq!(row.points, 3 * row.won + row.drawn);
        assert_eq!(row.goal_difference(), -2);
    }

    #[test]
    fn game_serializes_flat_status() {
        let game = Game::scheduled(7, 1, 2, 3, date());
        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["match_date"], "2025-03-03");
    }
}
