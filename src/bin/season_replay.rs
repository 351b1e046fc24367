use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use league_sim::championship::{ChampionshipForecast, predict_championship};
use league_sim::fixtures::generate_fixtures;
use league_sim::model::{Game, StandingsRow, TeamId};
use league_sim::roster::{default_roster, synthetic_roster};
use league_sim::score_model::ScoreModel;
use league_sim::season::{scheduled_weeks, split_by_status};
use league_sim::simulate::{side_profiles, simulate_week};
use league_sim::standings::league_table;

#[derive(Debug, Serialize)]
struct WeekLine {
    week: u32,
    forecast: ChampionshipForecast,
}

#[derive(Debug, Serialize)]
struct Replay {
    seed: u64,
    weeks: Vec<WeekLine>,
    table: Vec<StandingsRow>,
}

// Plays a whole season in memory, without touching the database. Handy for eyeballing
// how the forecast moves week by week for a given seed.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let seed = flag_value(&args, "--seed")
        .map(|v| v.parse::<u64>().context("invalid --seed"))
        .transpose()?
        .unwrap_or(2024);
    let teams = match flag_value(&args, "--teams") {
        Some(v) => synthetic_roster(v.parse::<usize>().context("invalid --teams")?),
        None => default_roster(),
    };
    let as_json = args.iter().any(|a| a == "--json");

    let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let start = NaiveDate::from_ymd_opt(2025, 8, 4).context("bad start date")?;
    let mut games = generate_fixtures(&ids, start)?;
    let model = ScoreModel::default();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut weeks = Vec::new();
    for week in scheduled_weeks(&games) {
        let table = league_table(&ids, &games);
        let profiles = side_profiles(&teams, &table);
        let played = simulate_week(week, &games, &profiles, &model, &mut rng)?;
        apply_results(&mut games, played);

        let table = league_table(&ids, &games);
        let (completed, scheduled) = split_by_status(&games);
        weeks.push(WeekLine {
            week,
            forecast: predict_championship(&teams, &table, &completed, &scheduled),
        });
    }

    let replay = Replay {
        seed,
        weeks,
        table: league_table(&ids, &games),
    };

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&replay).context("serialize replay")?
        );
        return Ok(());
    }

    let names: HashMap<TeamId, &str> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();
    for line in &replay.weeks {
        if let Some((id, p)) = line.forecast.favourite() {
            println!(
                "Week {:>2}: favourite {} ({p:.1}%)",
                line.week,
                names.get(&id).copied().unwrap_or("?")
            );
        }
    }
    println!();
    for (pos, row) in replay.table.iter().enumerate() {
        println!(
            "{:>2}. {:<22} {:>3} pts  GD {:>+4}",
            pos + 1,
            names.get(&row.team_id).copied().unwrap_or("?"),
            row.points,
            row.goal_difference()
        );
    }
    Ok(())
}

fn apply_results(games: &mut [Game], played: Vec<Game>) {
    let by_id: HashMap<u64, Game> = played.into_iter().map(|g| (g.id, g)).collect();
    for game in games.iter_mut() {
        if let Some(done) = by_id.get(&game.id) {
            *game = done.clone();
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(v) = arg.strip_prefix(&prefix) {
            return Some(v.trim());
        }
        if arg == flag {
            return args.get(idx + 1).map(|s| s.trim());
        }
    }
    None
}
