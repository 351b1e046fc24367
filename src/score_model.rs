use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MAX_GOALS: u8 = 5;

// P(goals = k) before the strength reweighting, k = 0..=4.
const BASE_GOAL_PROBS: [f64; 5] = [0.20, 0.35, 0.25, 0.15, 0.05];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreParams {
    pub home_advantage: f64,
    pub form_multiplier: f64,
    // Perturbation is a uniform integer in [-random_spread, +random_spread].
    pub random_spread: i32,
    pub home_multiplier: f64,
    pub away_multiplier: f64,
    pub home_chance_band: (f64, f64),
    pub away_chance_band: (f64, f64),
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            home_advantage: 15.0,
            form_multiplier: 5.0,
            random_spread: 8,
            home_multiplier: 1.2,
            away_multiplier: 0.9,
            home_chance_band: (0.2, 0.8),
            away_chance_band: (0.1, 0.7),
        }
    }
}

/// What the model needs to know about one side of a fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideProfile {
    /// Base rating, 0..=100.
    pub strength: f64,
    /// Share of games won so far this season, 0.0 when none played.
    pub win_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreline {
    pub home: u8,
    pub away: u8,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreModel {
    params: ScoreParams,
}

impl ScoreModel {
    pub fn new(params: ScoreParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScoreParams {
        &self.params
    }

    /// Samples a final score. Every random draw comes from `rng`, so a seeded
    /// generator replays the exact same result.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        home: SideProfile,
        away: SideProfile,
        rng: &mut R,
    ) -> Scoreline {
        let home_adj = self.adjusted_strength(home, true, rng);
        let away_adj = self.adjusted_strength(away, false, rng);

        let (home_chance, away_chance) = self.scoring_chances(home_adj, away_adj);

        Scoreline {
            home: self.sample_goals(home_chance, home_adj, rng),
            away: self.sample_goals(away_chance, away_adj, rng),
        }
    }

    pub fn adjusted_strength<R: Rng + ?Sized>(
        &self,
        side: SideProfile,
        is_home: bool,
        rng: &mut R,
    ) -> f64 {
        let spread = self.params.random_spread.max(0);
        let noise = rng.gen_range(-spread..=spread) as f64;
        let home_bonus = if is_home {
            self.params.home_advantage
        } else {
            0.0
        };
        side.strength + home_bonus + self.form_bonus(side.win_ratio) + noise
    }

    pub fn form_bonus(&self, win_ratio: f64) -> f64 {
        win_ratio.clamp(0.0, 1.0) * self.params.form_multiplier
    }

    /// Per-side probability of getting on the scoresheet, clamped into each side's band.
    pub fn scoring_chances(&self, home_adj: f64, away_adj: f64) -> (f64, f64) {
        let total = home_adj + away_adj;
        let (home_share, away_share) = if total > 0.0 {
            (home_adj / total, away_adj / total)
        } else {
            (0.5, 0.5)
        };
        let (h_lo, h_hi) = self.params.home_chance_band;
        let (a_lo, a_hi) = self.params.away_chance_band;
        (
            clamp(home_share * self.params.home_multiplier, h_lo, h_hi),
            clamp(away_share * self.params.away_multiplier, a_lo, a_hi),
        )
    }

    fn sample_goals<R: Rng + ?Sized>(&self, chance: f64, adjusted: f64, rng: &mut R) -> u8 {
        let probs = goal_distribution(chance, adjusted);
        let draw = rng.gen_range(0.0..1.0);
        pick_inverse_cdf(&probs, draw).min(MAX_GOALS)
    }
}

/// Reweights the base distribution: a higher `chance * strength/100` shrinks P(0)
/// and inflates every P(k >= 1). The result sums to 1.
pub fn goal_distribution(chance: f64, adjusted_strength: f64) -> [f64; 5] {
    let factor = (chance * (adjusted_strength / 100.0)).max(0.0);
    let mut out = [0.0; 5];
    for (goals, p) in BASE_GOAL_PROBS.iter().enumerate() {
        out[goals] = if goals == 0 {
            p * (2.0 - factor).max(0.0)
        } else {
            p * factor
        };
    }
    let sum: f64 = out.iter().sum();
    if sum > 0.0 {
        for p in &mut out {
            *p /= sum;
        }
    } else {
        out = BASE_GOAL_PROBS;
    }
    out
}

fn pick_inverse_cdf(probs: &[f64], draw: f64) -> u8 {
    let mut cumulative = 0.0;
    for (goals, p) in probs.iter().enumerate() {
        cumulative += p;
        if draw < cumulative {
            return goals as u8;
        }
    }
    // Float residue: land on the highest outcome that has any mass.
    probs.iter().rposition(|p| *p > 0.0).unwrap_or(0) as u8
}

fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}
