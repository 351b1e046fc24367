use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rusqlite::{Connection, params};

use crate::model::{Game, GameStatus, StandingsRow, Team};

const DATE_FMT: &str = "%Y-%m-%d";
const STATUS_SCHEDULED: &str = "scheduled";
const STATUS_COMPLETED: &str = "completed";

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("open in-memory sqlite db")?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE IF NOT EXISTS teams (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            country TEXT NOT NULL,
            logo TEXT NOT NULL,
            strength INTEGER NOT NULL CHECK (strength BETWEEN 0 AND 100)
        );
        CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY,
            home_team_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
            away_team_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
            week INTEGER NOT NULL,
            match_date TEXT NOT NULL,
            status TEXT NOT NULL,
            home_score INTEGER NULL,
            away_score INTEGER NULL,
            CHECK (home_team_id <> away_team_id)
        );
        CREATE INDEX IF NOT EXISTS idx_games_week ON games(week);
        CREATE INDEX IF NOT EXISTS idx_games_status ON games(status);

        CREATE TABLE IF NOT EXISTS standings (
            team_id INTEGER PRIMARY KEY REFERENCES teams(id) ON DELETE CASCADE,
            played INTEGER NOT NULL,
            won INTEGER NOT NULL,
            drawn INTEGER NOT NULL,
            lost INTEGER NOT NULL,
            goals_for INTEGER NOT NULL,
            goals_against INTEGER NOT NULL,
            points INTEGER NOT NULL
        );
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

pub fn upsert_teams(conn: &mut Connection, teams: &[Team]) -> Result<usize> {
    let tx = conn.transaction().context("begin team transaction")?;
    for team in teams {
        tx.execute(
            r#"
            INSERT INTO teams (id, name, country, logo, strength)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                country = excluded.country,
                logo = excluded.logo,
                strength = excluded.strength
            "#,
            params![
                team.id as i64,
                team.name,
                team.country,
                team.logo,
                team.strength as i64
            ],
        )
        .with_context(|| format!("upsert team {}", team.id))?;
    }
    tx.commit().context("commit team transaction")?;
    Ok(teams.len())
}

pub fn load_teams(conn: &Connection) -> Result<Vec<Team>> {
    let mut stmt = conn
        .prepare("SELECT id, name, country, logo, strength FROM teams ORDER BY id ASC")
        .context("prepare load teams query")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Team {
                id: row.get::<_, u32>(0)?,
                name: row.get(1)?,
                country: row.get(2)?,
                logo: row.get(3)?,
                strength: row.get::<_, u8>(4)?,
            })
        })
        .context("query load teams")?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("decode team row")?);
    }
    Ok(out)
}

/// Drops every game and standings row, then stores the new schedule and table.
pub fn replace_season(conn: &mut Connection, games: &[Game], table: &[StandingsRow]) -> Result<()> {
    let tx = conn.transaction().context("begin season transaction")?;
    tx.execute("DELETE FROM games", [])
        .context("clear previous games")?;
    for game in games {
        insert_game(&tx, game)?;
    }
    write_standings(&tx, table)?;
    tx.commit().context("commit season transaction")?;
    Ok(())
}

fn insert_game(conn: &Connection, game: &Game) -> Result<()> {
    let (status, home_score, away_score) = status_columns(&game.status);
    conn.execute(
        r#"
        INSERT INTO games (
            id, home_team_id, away_team_id, week, match_date,
            status, home_score, away_score
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            game.id as i64,
            game.home_team_id as i64,
            game.away_team_id as i64,
            game.week as i64,
            game.match_date.format(DATE_FMT).to_string(),
            status,
            home_score,
            away_score
        ],
    )
    .with_context(|| format!("insert game {}", game.id))?;
    Ok(())
}

/// All games, ordered by week, then date, then id.
pub fn load_games(conn: &Connection) -> Result<Vec<Game>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT id, home_team_id, away_team_id, week, match_date,
                   status, home_score, away_score
            FROM games
            ORDER BY week ASC, match_date ASC, id ASC
            "#,
        )
        .context("prepare load games query")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(GameRecord {
                id: row.get::<_, u64>(0)?,
                home_team_id: row.get::<_, u32>(1)?,
                away_team_id: row.get::<_, u32>(2)?,
                week: row.get::<_, u32>(3)?,
                match_date: row.get(4)?,
                status: row.get(5)?,
                home_score: row.get(6)?,
                away_score: row.get(7)?,
            })
        })
        .context("query load games")?;

    let mut out = Vec::new();
    for row in rows {
        let record = row.context("decode game row")?;
        out.push(record.into_game()?);
    }
    Ok(out)
}

/// Writes final scores for games that are still scheduled. A completed game is never
/// reopened or rewritten; returns how many rows changed.
pub fn save_results(conn: &Connection, games: &[Game]) -> Result<usize> {
    let mut changed = 0usize;
    for game in games {
        let Some((home, away)) = game.score() else {
            continue;
        };
        changed += conn
            .execute(
                r#"
                UPDATE games
                SET status = ?1, home_score = ?2, away_score = ?3
                WHERE id = ?4 AND status = ?5
                "#,
                params![
                    STATUS_COMPLETED,
                    home as i64,
                    away as i64,
                    game.id as i64,
                    STATUS_SCHEDULED
                ],
            )
            .with_context(|| format!("store result of game {}", game.id))?;
    }
    Ok(changed)
}

/// Swaps the whole standings table for `rows`.
pub fn write_standings(conn: &Connection, rows: &[StandingsRow]) -> Result<()> {
    conn.execute("DELETE FROM standings", [])
        .context("clear standings")?;
    for r in rows {
        conn.execute(
            r#"
            INSERT INTO standings (
                team_id, played, won, drawn, lost, goals_for, goals_against, points
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                r.team_id as i64,
                r.played as i64,
                r.won as i64,
                r.drawn as i64,
                r.lost as i64,
                r.goals_for as i64,
                r.goals_against as i64,
                r.points as i64
            ],
        )
        .with_context(|| format!("insert standings row for team {}", r.team_id))?;
    }
    Ok(())
}

pub fn load_standings(conn: &Connection) -> Result<Vec<StandingsRow>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT team_id, played, won, drawn, lost, goals_for, goals_against, points
            FROM standings
            ORDER BY team_id ASC
            "#,
        )
        .context("prepare load standings query")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(StandingsRow {
                team_id: row.get::<_, u32>(0)?,
                played: row.get::<_, u32>(1)?,
                won: row.get::<_, u32>(2)?,
                drawn: row.get::<_, u32>(3)?,
                lost: row.get::<_, u32>(4)?,
                goals_for: row.get::<_, u32>(5)?,
                goals_against: row.get::<_, u32>(6)?,
                points: row.get::<_, u32>(7)?,
            })
        })
        .context("query load standings")?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("decode standings row")?);
    }
    Ok(out)
}

/// Removes all games and standings; teams stay.
pub fn clear_season(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction().context("begin reset transaction")?;
    tx.execute("DELETE FROM games", [])
        .context("clear games")?;
    tx.execute("DELETE FROM standings", [])
        .context("clear standings")?;
    tx.commit().context("commit reset transaction")?;
    Ok(())
}

fn status_columns(status: &GameStatus) -> (&'static str, Option<i64>, Option<i64>) {
    match *status {
        GameStatus::Scheduled => (STATUS_SCHEDULED, None, None),
        GameStatus::Completed {
            home_score,
            away_score,
        } => (
            STATUS_COMPLETED,
            Some(home_score as i64),
            Some(away_score as i64),
        ),
    }
}

struct GameRecord {
    id: u64,
    home_team_id: u32,
    away_team_id: u32,
    week: u32,
    match_date: String,
    status: String,
    home_score: Option<i64>,
    away_score: Option<i64>,
}

impl GameRecord {
    fn into_game(self) -> Result<Game> {
        let match_date = NaiveDate::parse_from_str(&self.match_date, DATE_FMT)
            .with_context(|| format!("bad match_date {:?} on game {}", self.match_date, self.id))?;
        let status = match (self.status.as_str(), self.home_score, self.away_score) {
            (STATUS_SCHEDULED, _, _) => GameStatus::Scheduled,
            (STATUS_COMPLETED, Some(home), Some(away)) => GameStatus::Completed {
                home_score: u8::try_from(home)
                    .with_context(|| format!("home score {home} out of range on game {}", self.id))?,
                away_score: u8::try_from(away)
                    .with_context(|| format!("away score {away} out of range on game {}", self.id))?,
            },
            (other, _, _) => {
                return Err(anyhow!(
                    "game {} has status {other:?} without a complete score",
                    self.id
                ));
            }
        };
        Ok(Game {
            id: self.id,
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            week: self.week,
            match_date,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::default_roster;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 18).unwrap()
    }

    #[test]
    fn teams_round_trip_and_upsert_updates() {
        let mut conn = open_in_memory().unwrap();
        let mut teams = default_roster();
        upsert_teams(&mut conn, &teams).unwrap();
        teams[0].strength = 10;
        upsert_teams(&mut conn, &teams[..1]).unwrap();

        let loaded = load_teams(&conn).unwrap();
        assert_eq!(loaded.len(), 12);
        assert_eq!(loaded[0].strength, 10);
        assert_eq!(loaded[1], teams[1]);
    }

    #[test]
    fn completed_games_are_never_rewritten() {
        let mut conn = open_in_memory().unwrap();
        upsert_teams(&mut conn, &default_roster()[..2]).unwrap();
        let games = vec![Game::scheduled(1, 1, 2, 1, day())];
        replace_season(&mut conn, &games, &[]).unwrap();

        let first = vec![games[0].clone().complete(2, 1)];
        assert_eq!(save_results(&conn, &first).unwrap(), 1);
        let second = vec![games[0].clone().complete(0, 5)];
        assert_eq!(save_results(&conn, &second).unwrap(), 0);

        let stored = load_games(&conn).unwrap();
        assert_eq!(stored[0].score(), Some((2, 1)));
        assert_eq!(stored[0].match_date, day());
    }

    #[test]
    fn same_team_on_both_sides_is_rejected() {
        let mut conn = open_in_memory().unwrap();
        upsert_teams(&mut conn, &default_roster()[..2]).unwrap();
        let bad = vec![Game::scheduled(1, 1, 1, 1, day())];
        assert!(replace_season(&mut conn, &bad, &[]).is_err());
        assert!(load_games(&conn).unwrap().is_empty());
    }

    #[test]
    fn clear_season_keeps_teams() {
        let mut conn = open_in_memory().unwrap();
        upsert_teams(&mut conn, &default_roster()[..2]).unwrap();
        let games = vec![Game::scheduled(1, 1, 2, 1, day())];
        replace_season(&mut conn, &games, &[StandingsRow::empty(1), StandingsRow::empty(2)])
            .unwrap();
        clear_season(&mut conn).unwrap();
        assert!(load_games(&conn).unwrap().is_empty());
        assert!(load_standings(&conn).unwrap().is_empty());
        assert_eq!(load_teams(&conn).unwrap().len(), 2);
    }
}
