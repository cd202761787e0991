pub mod leaderboard;
pub mod player_stats;

pub use leaderboard::{aggregate, Leaderboard};
pub use player_stats::PlayerStats;
