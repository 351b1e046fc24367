use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use league_sim::championship::{ChampionshipForecast, SeasonPhase, predict_championship};
use league_sim::fixtures::generate_fixtures;
use league_sim::model::{Game, Team, TeamId};
use league_sim::roster::{default_roster, synthetic_roster};
use league_sim::score_model::ScoreModel;
use league_sim::season::{scheduled_weeks, split_by_status};
use league_sim::simulate::{side_profiles, simulate_week};
use league_sim::standings::{league_table, recalculate_standings};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()
}

fn club(id: TeamId, strength: u8) -> Team {
    Team {
        id,
        name: format!("Club {id}"),
        country: String::new(),
        logo: String::new(),
        strength,
    }
}

fn play_weeks(teams: &[Team], games: &mut [Game], weeks: usize, seed: u64) {
    let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let model = ScoreModel::default();
    let mut rng = StdRng::seed_from_u64(seed);
    for week in scheduled_weeks(games).into_iter().take(weeks) {
        let profiles = side_profiles(teams, &league_table(&ids, games));
        for done in simulate_week(week, games, &profiles, &model, &mut rng).unwrap() {
            if let Some(slot) = games.iter_mut().find(|g| g.id == done.id) {
                *slot = done;
            }
        }
    }
}

fn forecast_after(teams: &[Team], games: &[Game]) -> ChampionshipForecast {
    let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let table = league_table(&ids, games);
    let (completed, scheduled) = split_by_status(games);
    predict_championship(teams, &table, &completed, &scheduled)
}

#[test]
fn odds_add_up_to_one_hundred_every_week() {
    let teams = default_roster();
    let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let mut games = generate_fixtures(&ids, day()).unwrap();
    // Each entry is rounded to one decimal on its own.
    let drift = 0.05 * teams.len() as f64 + 1e-9;

    let preseason = forecast_after(&teams, &games);
    assert_eq!(preseason.phase, SeasonPhase::PreSeason);
    let sum: f64 = preseason.odds.values().sum();
    assert!((sum - 100.0).abs() <= drift, "pre-season sum {sum}");

    let total_weeks = scheduled_weeks(&games).len();
    for _ in 0..total_weeks {
        play_weeks(&teams, &mut games, 1, 17);
        let forecast = forecast_after(&teams, &games);
        let sum: f64 = forecast.odds.values().sum();
        assert!((sum - 100.0).abs() <= drift, "{:?} sum {sum}", forecast.phase);
        assert!(forecast.odds.values().all(|p| (0.0..=100.0).contains(p)));
    }
    assert_eq!(forecast_after(&teams, &games).phase, SeasonPhase::Complete);
}

#[test]
fn preseason_odds_are_each_strength_share_rounded() {
    let teams = default_roster();
    let total: f64 = teams.iter().map(|t| f64::from(t.strength)).sum();
    let forecast = predict_championship(&teams, &[], &[], &[]);
    for team in &teams {
        let expected = (f64::from(team.strength) / total * 100.0 * 10.0).round() / 10.0;
        assert_eq!(forecast.odds[&team.id], expected, "team {}", team.id);
    }

    let level: Vec<Team> = (1..=3).map(|id| club(id, 50)).collect();
    let forecast = predict_championship(&level, &[], &[], &[]);
    assert!(forecast.odds.values().all(|p| *p == 33.3));
}

#[test]
fn preseason_ignores_standings_and_uses_strength_only() {
    let teams = vec![club(1, 80), club(2, 40), club(3, 80)];
    let games = generate_fixtures(&[1, 2, 3], day()).unwrap();
    let forecast = forecast_after(&teams, &games);
    assert_eq!(forecast.odds[&1], 40.0);
    assert_eq!(forecast.odds[&2], 20.0);
    assert_eq!(forecast.odds[&3], 40.0);
}

#[test]
fn identical_teams_get_identical_odds() {
    let teams: Vec<Team> = (1..=4).map(|id| club(id, 70)).collect();
    let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let games = generate_fixtures(&ids, day()).unwrap();

    let preseason = forecast_after(&teams, &games);
    for p in preseason.odds.values() {
        assert!((p - 25.0).abs() <= 0.1);
    }

    // Every first-week game drawn 1-1 leaves all four rows identical.
    let mut games = games;
    for g in games.iter_mut().filter(|g| g.week == 1) {
        *g = g.clone().complete(1, 1);
    }
    let forecast = forecast_after(&teams, &games);
    assert_eq!(forecast.phase, SeasonPhase::InProgress);
    for p in forecast.odds.values() {
        assert!((p - 25.0).abs() <= 0.1, "{:?}", forecast.odds);
    }
}

#[test]
fn scripted_tie_goes_to_the_head_to_head_winner() {
    let teams = vec![club(1, 50), club(2, 90), club(3, 50)];
    // 1 and 2 both finish on 7 points. 2 has the better overall goal difference, but
    // 1 took four points out of their two meetings.
    let results = [
        (1, 1, 2, 2, 1),
        (2, 2, 1, 0, 0),
        (3, 1, 3, 1, 0),
        (4, 3, 1, 1, 0),
        (5, 2, 3, 5, 0),
        (6, 3, 2, 0, 1),
    ];
    let games: Vec<Game> = results
        .iter()
        .map(|&(id, home, away, hs, aws)| {
            Game::scheduled(id, home, away, id as u32, day()).complete(hs, aws)
        })
        .collect();

    let rows = recalculate_standings(&games);
    let p = |id: TeamId| rows.iter().find(|r| r.team_id == id).unwrap().points;
    assert_eq!(p(1), 7);
    assert_eq!(p(2), 7);
    assert!(
        rows.iter().find(|r| r.team_id == 2).unwrap().goal_difference()
            > rows.iter().find(|r| r.team_id == 1).unwrap().goal_difference()
    );

    let forecast = predict_championship(&teams, &rows, &games, &[]);
    assert_eq!(forecast.phase, SeasonPhase::Complete);
    assert_eq!(forecast.odds[&1], 100.0);
    assert_eq!(forecast.odds[&2], 0.0);
    assert_eq!(forecast.odds[&3], 0.0);
    assert!(forecast.unresolved_tie.is_empty());
}

#[test]
fn runaway_leader_eliminates_the_rest_late_in_the_season() {
    let teams = synthetic_roster(4);
    let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let mut games = generate_fixtures(&ids, day()).unwrap();
    // Team 1 wins everything through week 5; the rest draw among themselves.
    for g in games.iter_mut().filter(|g| g.week <= 5) {
        let (h, a) = if g.home_team_id == 1 {
            (3, 0)
        } else if g.away_team_id == 1 {
            (0, 3)
        } else {
            (1, 1)
        };
        *g = g.clone().complete(h, a);
    }
    let forecast = forecast_after(&teams, &games);
    assert_eq!(forecast.phase, SeasonPhase::InProgress);
    assert_eq!(forecast.odds[&1], 100.0);
    for id in [2, 3, 4] {
        assert_eq!(forecast.odds[&id], 0.0);
    }
}
