use chrono::{Duration as ChronoDuration, NaiveDate};

use crate::error::LeagueError;
use crate::model::{Game, TeamId};

/// Builds a double round-robin with the circle method.
///
/// Returns the first half (weeks `1..=rounds`) followed by the mirrored second half
/// (weeks `rounds+1..=2*rounds`), with game ids numbered from 1 in that order. An odd
/// roster gets a bye slot; pairings against it are dropped so that team sits the week out.
pub fn generate_fixtures(team_ids: &[TeamId], start: NaiveDate) -> Result<Vec<Game>, LeagueError> {
    if team_ids.len() < 2 {
        return Err(LeagueError::NotEnoughTeams {
            count: team_ids.len(),
        });
    }

    let mut slots: Vec<Option<TeamId>> = team_ids.iter().copied().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }
    let team_count = slots.len();
    let rounds = team_count - 1;

    let first_half = first_half_pairings(&slots, rounds);

    let mut games = Vec::with_capacity(team_ids.len() * (team_ids.len() - 1));
    let mut next_id = 1u64;
    for (round, pairings) in first_half.iter().enumerate() {
        for &(home, away) in pairings {
            games.push(Game::scheduled(
                next_id,
                home,
                away,
                round as u32 + 1,
                week_offset(start, round),
            ));
            next_id += 1;
        }
    }
    for (round, pairings) in first_half.iter().enumerate() {
        for &(home, away) in pairings {
            games.push(Game::scheduled(
                next_id,
                away,
                home,
                (round + rounds) as u32 + 1,
                week_offset(start, round + rounds),
            ));
            next_id += 1;
        }
    }
    Ok(games)
}

fn first_half_pairings(slots: &[Option<TeamId>], rounds: usize) -> Vec<Vec<(TeamId, TeamId)>> {
    let team_count = slots.len();
    let per_round = team_count / 2;
    let mut order: Vec<usize> = (0..team_count).collect();
    let mut out = Vec::with_capacity(rounds);

    for round in 0..rounds {
        let mut pairings = Vec::with_capacity(per_round);
        for i in 0..per_round {
            let (Some(a), Some(b)) = (slots[order[i]], slots[order[team_count - 1 - i]]) else {
                continue;
            };
            // Alternate venues so the anchored slot is not always at home.
            if round % 2 == 0 {
                pairings.push((a, b));
            } else {
                pairings.push((b, a));
            }
        }
        out.push(pairings);
        rotate_keep_anchor(&mut order);
    }
    out
}

// Slot 0 stays put; everything else moves one position to the right.
fn rotate_keep_anchor(order: &mut [usize]) {
    if order.len() > 2 {
        order[1..].rotate_right(1);
    }
}

fn week_offset(start: NaiveDate, weeks: usize) -> NaiveDate {
    start + ChronoDuration::weeks(weeks as i64)
}
