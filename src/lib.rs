//! Kahoot leaderboard publisher
//!
//! Reads game results from a spreadsheet, ranks players and rewrites a styled
//! leaderboard sheet; every other Monday it also posts a top-three summary to
//! a chat webhook.
//!
//! - `table`: worksheet layouts and the score-record reader
//! - `analysis`: the leaderboard aggregator
//! - `render`: dashboard grid, styling and number formatting
//! - `sheets`: spreadsheet stores (Google Sheets, CSV) and publishing
//! - `notify`: alert schedule and chat webhook
//! - `runner`: refresh, scheduled and watch modes

pub mod analysis;
pub mod config;
pub mod display;
pub mod error;
pub mod notify;
pub mod render;
pub mod runner;
pub mod sheets;
pub mod snapshot;
pub mod table;

pub use analysis::{aggregate, Leaderboard, PlayerStats};
pub use error::AppError;
pub use table::{GameTable, Layout, ScoreRecord};
