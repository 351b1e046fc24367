use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};

use league_sim::config::LeagueConfig;
use league_sim::league::{self, LeagueSnapshot, WeekReport};
use league_sim::league_db;
use league_sim::model::{Game, TeamId};
use league_sim::score_model::ScoreModel;

const USAGE: &str = "\
usage: league_sim <command> [--db PATH] [--seed N] [--verbose]

commands:
  init          seed the default teams if the league is empty
  generate      build a new double round-robin (clears the current season)
  week [N]      play week N, or the current week when N is omitted
  all           play every remaining week
  reset         delete all games and standings
  table         print the league table and title odds
  json          print the full league snapshot as JSON";

#[derive(Debug)]
struct CliArgs {
    command: String,
    week: Option<u32>,
    db: Option<PathBuf>,
    seed: Option<u64>,
    verbose: bool,
}

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = match parse_args(std::env::args().skip(1).collect()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<ExitCode> {
    let mut cfg = LeagueConfig::from_env();
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    let db_path = args
        .db
        .or(cfg.db_path.clone())
        .context("unable to resolve sqlite path; pass --db or set LEAGUE_DB_PATH")?;
    let mut conn = league_db::open_db(&db_path)?;
    let model = ScoreModel::new(cfg.score);
    let mut rng = cfg.rng();

    match args.command.as_str() {
        "init" => {
            let added = league::ensure_roster(&mut conn)?;
            println!("Teams added: {added}");
        }
        "generate" => {
            league::ensure_roster(&mut conn)?;
            let count = league::generate_season(&mut conn, cfg.season_start)?;
            println!("Fixtures generated: {count} games");
        }
        "week" => {
            let report = match args.week {
                Some(week) => league::play_week(&mut conn, week, &model, &mut rng)?,
                None => league::play_current_week(&mut conn, &model, &mut rng)?,
            };
            let names = team_names(&league::snapshot(&conn)?);
            match report {
                WeekReport::Played { week, games } => print_week(week, &games, &names),
                WeekReport::NothingToSimulate { week } => {
                    println!("No scheduled games found for week {week}.");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        "all" => {
            let reports = league::play_all_weeks(&mut conn, &model, &mut rng)?;
            if reports.is_empty() {
                println!("There are no scheduled games to simulate.");
                return Ok(ExitCode::FAILURE);
            }
            let names = team_names(&league::snapshot(&conn)?);
            for report in reports {
                if let WeekReport::Played { week, games } = report {
                    print_week(week, &games, &names);
                }
            }
        }
        "reset" => {
            league::reset(&mut conn)?;
            println!("All games and standings have been reset.");
        }
        "table" => print_table(&league::snapshot(&conn)?),
        "json" => {
            let snap = league::snapshot(&conn)?;
            let json = serde_json::to_string_pretty(&snap).context("serialize snapshot")?;
            println!("{json}");
        }
        other => return Err(anyhow!("unknown command {other:?}\n\n{USAGE}")),
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_args(args: Vec<String>) -> Result<CliArgs> {
    let mut command = None;
    let mut week = None;
    let mut db = None;
    let mut seed = None;
    let mut verbose = false;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if let Some(path) = arg.strip_prefix("--db=") {
            db = Some(PathBuf::from(path.trim()));
        } else if arg == "--db" {
            let next = iter.next().context("--db needs a path")?;
            db = Some(PathBuf::from(next.trim()));
        } else if let Some(raw) = arg.strip_prefix("--seed=") {
            seed = Some(parse_seed(raw)?);
        } else if arg == "--seed" {
            let next = iter.next().context("--seed needs a number")?;
            seed = Some(parse_seed(&next)?);
        } else if arg == "--verbose" || arg == "-v" {
            verbose = true;
        } else if command.is_none() {
            command = Some(arg);
        } else if command.as_deref() == Some("week") && week.is_none() {
            week = Some(
                arg.trim()
                    .parse::<u32>()
                    .with_context(|| format!("invalid week {arg:?}"))?,
            );
        } else {
            return Err(anyhow!("unexpected argument {arg:?}"));
        }
    }

    Ok(CliArgs {
        command: command.context("missing command")?,
        week,
        db,
        seed,
        verbose,
    })
}

fn parse_seed(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("invalid seed {raw:?}"))
}

fn team_names(snap: &LeagueSnapshot) -> HashMap<TeamId, String> {
    snap.teams.iter().map(|t| (t.id, t.name.clone())).collect()
}

fn name_of(names: &HashMap<TeamId, String>, id: TeamId) -> String {
    names.get(&id).cloned().unwrap_or_else(|| format!("#{id}"))
}

fn print_week(week: u32, games: &[Game], names: &HashMap<TeamId, String>) {
    println!("Week {week}");
    for game in games {
        let Some((home, away)) = game.score() else {
            continue;
        };
        println!(
            "  {:>22} {home} - {away} {}",
            name_of(names, game.home_team_id),
            name_of(names, game.away_team_id)
        );
    }
}

fn print_table(snap: &LeagueSnapshot) {
    let names = team_names(snap);
    println!(
        "Week {} ({})",
        snap.current_week,
        if snap.has_scheduled_games {
            "games to play"
        } else {
            "nothing scheduled"
        }
    );
    println!(
        "{:>3}  {:<22} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}  {:>6}",
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts", "Title%"
    );
    for (pos, row) in snap.table.iter().enumerate() {
        let odds = snap.forecast.odds.get(&row.team_id).copied().unwrap_or(0.0);
        println!(
            "{:>3}  {:<22} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}  {:>6.1}",
            pos + 1,
            name_of(&names, row.team_id),
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            row.goal_difference(),
            row.points,
            odds
        );
    }
    if !snap.forecast.unresolved_tie.is_empty() {
        let tied: Vec<String> = snap
            .forecast
            .unresolved_tie
            .iter()
            .map(|id| name_of(&names, *id))
            .collect();
        println!("Unbroken title tie: {}", tied.join(", "));
    }
}
