use super::player_stats::{PlayerStats, PlayerStatsTracker};
use crate::table::{GameTable, Placing, ScoreRecord, WinRule};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Fold score records into one stats row per player, ranked by total score.
///
/// First-place credit follows `rule`:
/// - `UniqueMaximum`: per game label, the single player holding the top score
///   wins; a shared top score credits nobody.
/// - `ExplicitFirst`: records placed `First` win outright.
///
/// Equal totals keep the order in which players first appear in `records`.
pub fn aggregate(records: &[ScoreRecord], rule: WinRule) -> Vec<PlayerStats> {
    let mut tracker = PlayerStatsTracker::new();
    for record in records {
        tracker.add_game(&record.player, record.score);
    }

    match rule {
        WinRule::UniqueMaximum => {
            for winner in unique_game_winners(records) {
                tracker.credit_win(winner);
            }
        }
        WinRule::ExplicitFirst => {
            for record in records
                .iter()
                .filter(|r| r.score > 0.0 && r.placing == Some(Placing::First))
            {
                tracker.credit_win(&record.player);
            }
        }
    }

    let mut stats = tracker.into_stats();
    // sort_by is stable, which keeps input order on equal totals
    stats.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
    });
    stats
}

struct GameTop<'a> {
    score: f64,
    holders: usize,
    player: &'a str,
}

fn unique_game_winners(records: &[ScoreRecord]) -> Vec<&str> {
    let mut order: Vec<&str> = Vec::new();
    let mut tops: HashMap<&str, GameTop> = HashMap::new();

    for record in records.iter().filter(|r| r.score > 0.0) {
        match tops.get_mut(record.occurred_on.as_str()) {
            None => {
                order.push(&record.occurred_on);
                tops.insert(
                    &record.occurred_on,
                    GameTop {
                        score: record.score,
                        holders: 1,
                        player: &record.player,
                    },
                );
            }
            Some(top) if record.score > top.score => {
                top.score = record.score;
                top.holders = 1;
                top.player = &record.player;
            }
            Some(top) if record.score == top.score => top.holders += 1,
            Some(_) => {}
        }
    }

    order
        .into_iter()
        .filter_map(|game| tops.get(game))
        .filter(|top| top.holders == 1)
        .map(|top| top.player)
        .collect()
}

/// Ranked player statistics for one aggregation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    entries: Vec<PlayerStats>,
}

impl Leaderboard {
    pub fn from_table(table: &GameTable) -> Self {
        let entries = aggregate(&table.records, table.layout.win_rule());
        log::info!("Calculated leaderboard for {} players", entries.len());
        Leaderboard { entries }
    }

    pub fn from_entries(entries: Vec<PlayerStats>) -> Self {
        Leaderboard { entries }
    }

    pub fn entries(&self) -> &[PlayerStats] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self, n: usize) -> &[PlayerStats] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn leader(&self) -> Option<&PlayerStats> {
        self.entries.first()
    }

    /// Highest single-game score and the first ranked player holding it.
    pub fn highest_score(&self) -> Option<(&str, f64)> {
        let mut best: Option<&PlayerStats> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.best_score > b.best_score) {
                best = Some(entry);
            }
        }
        best.map(|b| (b.player.as_str(), b.best_score))
    }

    /// Mean of the players' average scores.
    pub fn average_score(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.entries.iter().map(|e| e.avg_score()).sum::<f64>() / self.entries.len() as f64
    }

    pub fn total_participations(&self) -> usize {
        self.entries.iter().map(|e| e.games_played).sum()
    }
}
