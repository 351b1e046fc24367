use rand::SeedableRng;
use rand::rngs::StdRng;

use league_sim::score_model::{MAX_GOALS, ScoreModel, ScoreParams, SideProfile};

fn side(strength: f64, win_ratio: f64) -> SideProfile {
    SideProfile {
        strength,
        win_ratio,
    }
}

#[test]
fn scores_never_exceed_the_cap() {
    let model = ScoreModel::default();
    let mut rng = StdRng::seed_from_u64(1);
    for strength in [0.0, 25.0, 50.0, 75.0, 100.0] {
        for _ in 0..200 {
            let score = model.sample(side(strength, 1.0), side(100.0 - strength, 0.0), &mut rng);
            assert!(score.home <= MAX_GOALS);
            assert!(score.away <= MAX_GOALS);
        }
    }
}

#[test]
fn stronger_team_scores_more_on_average() {
    let model = ScoreModel::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let strong = side(90.0, 0.5);
    let weak = side(40.0, 0.5);

    let trials = 400;
    let (mut strong_goals, mut weak_goals) = (0u32, 0u32);
    for i in 0..trials {
        if i % 2 == 0 {
            let s = model.sample(strong, weak, &mut rng);
            strong_goals += u32::from(s.home);
            weak_goals += u32::from(s.away);
        } else {
            let s = model.sample(weak, strong, &mut rng);
            weak_goals += u32::from(s.home);
            strong_goals += u32::from(s.away);
        }
    }
    assert!(
        strong_goals > weak_goals,
        "strong {strong_goals} vs weak {weak_goals} over {trials} games"
    );
}

#[test]
fn home_side_gets_the_edge_between_equals() {
    let model = ScoreModel::default();
    let mut rng = StdRng::seed_from_u64(99);
    let even = side(65.0, 0.4);

    let (mut home_goals, mut away_goals) = (0u32, 0u32);
    for _ in 0..600 {
        let s = model.sample(even, even, &mut rng);
        home_goals += u32::from(s.home);
        away_goals += u32::from(s.away);
    }
    assert!(home_goals > away_goals);
}

#[test]
fn same_seed_replays_the_same_scores() {
    let model = ScoreModel::default();
    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..50)
            .map(|_| model.sample(side(70.0, 0.3), side(55.0, 0.6), &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(5), run(5));
}

#[test]
fn zero_spread_removes_the_noise_from_adjusted_strength() {
    let model = ScoreModel::new(ScoreParams {
        random_spread: 0,
        ..ScoreParams::default()
    });
    let mut rng = StdRng::seed_from_u64(0);
    let home = model.adjusted_strength(side(60.0, 1.0), true, &mut rng);
    let away = model.adjusted_strength(side(60.0, 1.0), false, &mut rng);
    assert!((home - 80.0).abs() < 1e-12);
    assert!((away - 65.0).abs() < 1e-12);
}
