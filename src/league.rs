use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};
use rand::Rng;
use rusqlite::Connection;
use serde::Serialize;

use crate::championship::{ChampionshipForecast, predict_championship};
use crate::fixtures::generate_fixtures;
use crate::league_db;
use crate::model::{Game, StandingsRow, Team, TeamId};
use crate::roster::default_roster;
use crate::score_model::ScoreModel;
use crate::season::{current_week, has_scheduled_games_for_week, scheduled_weeks, split_by_status};
use crate::simulate::{side_profiles, simulate_week};
use crate::standings::league_table;

#[derive(Debug, Clone, PartialEq)]
pub enum WeekReport {
    Played { week: u32, games: Vec<Game> },
    NothingToSimulate { week: u32 },
}

#[derive(Debug, Clone, Serialize)]
pub struct LeagueSnapshot {
    pub teams: Vec<Team>,
    pub games: Vec<Game>,
    pub table: Vec<StandingsRow>,
    pub current_week: u32,
    pub has_scheduled_games: bool,
    pub forecast: ChampionshipForecast,
}

/// Seeds the default clubs when the league has no teams yet. Returns how many were added.
pub fn ensure_roster(conn: &mut Connection) -> Result<usize> {
    if !league_db::load_teams(conn)?.is_empty() {
        return Ok(0);
    }
    let added = league_db::upsert_teams(conn, &default_roster())?;
    info!("seeded {added} default teams");
    Ok(added)
}

/// Replaces any previous season with a fresh double round-robin and an all-zero table.
pub fn generate_season(conn: &mut Connection, start: NaiveDate) -> Result<usize> {
    let teams = league_db::load_teams(conn)?;
    let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let games = generate_fixtures(&ids, start).context("generate fixtures")?;
    let table = league_table(&ids, &[]);
    league_db::replace_season(conn, &games, &table)?;
    info!(
        "generated {} games over {} weeks for {} teams starting {start}",
        games.len(),
        games.iter().map(|g| g.week).max().unwrap_or(0),
        teams.len()
    );
    Ok(games.len())
}

/// Plays the current week (the first one with scheduled games).
pub fn play_current_week<R: Rng + ?Sized>(
    conn: &mut Connection,
    model: &ScoreModel,
    rng: &mut R,
) -> Result<WeekReport> {
    let games = league_db::load_games(conn)?;
    let week = current_week(&games);
    play_week(conn, week, model, rng)
}

/// Simulates `week`, stores the results and rebuilds standings from the full history,
/// all in one transaction.
pub fn play_week<R: Rng + ?Sized>(
    conn: &mut Connection,
    week: u32,
    model: &ScoreModel,
    rng: &mut R,
) -> Result<WeekReport> {
    let tx = conn.transaction().context("begin week transaction")?;

    let games = league_db::load_games(&tx)?;
    if !has_scheduled_games_for_week(&games, week) {
        warn!("no scheduled games for week {week}");
        return Ok(WeekReport::NothingToSimulate { week });
    }

    let teams = league_db::load_teams(&tx)?;
    let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    // Form comes from the game history, not from whatever the standings table holds.
    let profiles = side_profiles(&teams, &league_table(&ids, &games));
    let played = simulate_week(week, &games, &profiles, model, rng)
        .with_context(|| format!("simulate week {week}"))?;

    league_db::save_results(&tx, &played)?;
    let history = league_db::load_games(&tx)?;
    league_db::write_standings(&tx, &league_table(&ids, &history))?;
    tx.commit().context("commit week transaction")?;

    info!("week {week}: played {} games", played.len());
    Ok(WeekReport::Played {
        week,
        games: played,
    })
}

/// Plays every remaining week in order. Empty when nothing was scheduled.
pub fn play_all_weeks<R: Rng + ?Sized>(
    conn: &mut Connection,
    model: &ScoreModel,
    rng: &mut R,
) -> Result<Vec<WeekReport>> {
    let weeks = scheduled_weeks(&league_db::load_games(conn)?);
    let mut reports = Vec::with_capacity(weeks.len());
    for week in weeks {
        reports.push(play_week(conn, week, model, rng)?);
    }
    Ok(reports)
}

pub fn reset(conn: &mut Connection) -> Result<()> {
    league_db::clear_season(conn)?;
    info!("all games and standings have been reset");
    Ok(())
}

pub fn snapshot(conn: &Connection) -> Result<LeagueSnapshot> {
    let teams = league_db::load_teams(conn)?;
    let games = league_db::load_games(conn)?;
    let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let table = league_table(&ids, &games);

    let (completed, scheduled) = split_by_status(&games);
    let forecast = predict_championship(&teams, &table, &completed, &scheduled);
    if !forecast.unresolved_tie.is_empty() {
        warn!(
            "title tie between {:?} survives every tiebreak; awarding it to {:?}",
            forecast.unresolved_tie,
            forecast.unresolved_tie.first()
        );
    }

    let week = current_week(&games);
    Ok(LeagueSnapshot {
        has_scheduled_games: has_scheduled_games_for_week(&games, week),
        current_week: week,
        teams,
        games,
        table,
        forecast,
    })
}
