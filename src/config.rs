use std::env;
use std::path::PathBuf;

use chrono::{Datelike, Duration as ChronoDuration, NaiveDate, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::score_model::ScoreParams;

const CACHE_DIR: &str = "league_sim";
const DB_FILE: &str = "league.sqlite";

#[derive(Debug, Clone)]
pub struct LeagueConfig {
    pub db_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub season_start: NaiveDate,
    pub score: ScoreParams,
}

impl LeagueConfig {
    pub fn from_env() -> Self {
        let db_path = opt_env("LEAGUE_DB_PATH")
            .map(PathBuf::from)
            .or_else(default_db_path);
        let seed = opt_env("LEAGUE_SEED").and_then(|v| v.trim().parse::<u64>().ok());
        let season_start = opt_env("LEAGUE_SEASON_START")
            .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
            .unwrap_or_else(start_of_current_week);

        let defaults = ScoreParams::default();
        let score = ScoreParams {
            home_advantage: env_f64("LEAGUE_HOME_ADVANTAGE", defaults.home_advantage)
                .clamp(0.0, 50.0),
            form_multiplier: env_f64("LEAGUE_FORM_MULTIPLIER", defaults.form_multiplier)
                .clamp(0.0, 50.0),
            random_spread: env_f64("LEAGUE_RANDOM_SPREAD", f64::from(defaults.random_spread))
                .clamp(0.0, 50.0) as i32,
            ..defaults
        };

        Self {
            db_path,
            seed,
            season_start,
            score,
        }
    }

    /// Seeded when `seed` is set, otherwise drawn from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

pub fn start_of_current_week() -> NaiveDate {
    monday_of(Utc::now().date_naive())
}

pub fn monday_of(day: NaiveDate) -> NaiveDate {
    day - ChronoDuration::days(i64::from(day.weekday().num_days_from_monday()))
}

pub fn default_db_path() -> Option<PathBuf> {
    if let Ok(base) = env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(DB_FILE));
        }
    }
    let home = env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR).join(DB_FILE))
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| {
        if val.trim().is_empty() {
            None
        } else {
            Some(val)
        }
    })
}

fn env_f64(key: &str, default: f64) -> f64 {
    opt_env(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monday_of_rolls_back_to_week_start() {
        let thursday = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(
            monday_of(thursday),
            NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()
        );
        let monday = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        assert_eq!(monday_of(monday), monday);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        use rand::Rng;
        let cfg = LeagueConfig {
            db_path: None,
            seed: Some(99),
            season_start: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            score: ScoreParams::default(),
        };
        let a: u32 = cfg.rng().gen_range(0..1_000_000);
        let b: u32 = cfg.rng().gen_range(0..1_000_000);
        assert_eq!(a, b);
    }
}
