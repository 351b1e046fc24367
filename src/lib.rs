//! Round-robin league simulation: fixtures, stochastic match results, standings and
//! championship forecasts, with a SQLite-backed season driver on top.

pub mod championship;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod league;
pub mod league_db;
pub mod model;
pub mod roster;
pub mod score_model;
pub mod season;
pub mod simulate;
pub mod standings;
pub mod tiebreak;
