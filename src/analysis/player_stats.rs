use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player: String,
    pub total_score: f64,
    pub games_played: usize,
    pub best_score: f64,
    pub first_place_count: usize,
}

impl PlayerStats {
    pub fn new(player: String) -> Self {
        PlayerStats {
            player,
            total_score: 0.0,
            games_played: 0,
            best_score: 0.0,
            first_place_count: 0,
        }
    }

    pub fn avg_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_score / self.games_played as f64
        }
    }

    /// Share of games won, in percent.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            (self.first_place_count as f64 / self.games_played as f64) * 100.0
        }
    }
}

/// Accumulates per-player totals, remembering the order players were first seen.
pub struct PlayerStatsTracker {
    order: Vec<String>,
    stats: HashMap<String, PlayerStats>,
}

impl PlayerStatsTracker {
    pub fn new() -> Self {
        PlayerStatsTracker {
            order: Vec::new(),
            stats: HashMap::new(),
        }
    }

    fn entry(&mut self, player: &str) -> &mut PlayerStats {
        if !self.stats.contains_key(player) {
            self.order.push(player.to_string());
        }
        self.stats
            .entry(player.to_string())
            .or_insert_with(|| PlayerStats::new(player.to_string()))
    }

    /// Record one game. Scores at or below zero mean the player sat it out.
    pub fn add_game(&mut self, player: &str, score: f64) {
        if score <= 0.0 {
            return;
        }
        let entry = self.entry(player);
        entry.total_score += score;
        entry.games_played += 1;
        entry.best_score = entry.best_score.max(score);
    }

    pub fn credit_win(&mut self, player: &str) {
        if let Some(entry) = self.stats.get_mut(player) {
            entry.first_place_count += 1;
        }
    }

    /// Players with at least one game, in first-seen order.
    pub fn into_stats(mut self) -> Vec<PlayerStats> {
        self.order
            .iter()
            .filter_map(|name| self.stats.remove(name))
            .filter(|s| s.games_played > 0)
            .collect()
    }
}

impl Default for PlayerStatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
