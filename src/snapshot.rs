use crate::analysis::Leaderboard;
use crate::error::AppError;
use crate::table::Layout;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SNAPSHOT_FILE: &str = "last_run.json";

/// Record of the last published refresh, kept for the interactive menu.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RunSnapshot {
    pub refreshed_at: DateTime<Utc>,
    pub layout: Layout,
    pub players: usize,
    pub total_games: usize,
    pub leader: Option<String>,
    #[serde(default)]
    pub last_alert_at: Option<DateTime<Utc>>,
}

impl RunSnapshot {
    pub fn new(board: &Leaderboard, layout: Layout, total_games: usize, at: DateTime<Utc>) -> Self {
        RunSnapshot {
            refreshed_at: at,
            layout,
            players: board.len(),
            total_games,
            leader: board.leader().map(|p| p.player.clone()),
            last_alert_at: None,
        }
    }

    pub fn path(dir: &Path) -> PathBuf {
        dir.join(SNAPSHOT_FILE)
    }

    /// `Ok(None)` when no run has been recorded yet.
    pub fn load(dir: &Path) -> Result<Option<Self>, AppError> {
        match fs::read_to_string(Self::path(dir)) {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| AppError::JsonError(format!("Failed to parse snapshot: {}", e))),
            Err(_) => Ok(None),
        }
    }

    pub fn save(&self, dir: &Path) -> Result<(), AppError> {
        fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize snapshot: {}", e)))?;
        fs::write(Self::path(dir), json)?;
        Ok(())
    }

    /// Carry the previous alert time forward unless this run sent one.
    pub fn inherit_alert(&mut self, previous: Option<&RunSnapshot>) {
        if self.last_alert_at.is_none() {
            self.last_alert_at = previous.and_then(|p| p.last_alert_at);
        }
    }

    pub fn age_minutes(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.refreshed_at).num_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PlayerStats;
    use chrono::TimeZone;

    fn board() -> Leaderboard {
        Leaderboard::from_entries(vec![PlayerStats {
            player: "Alice".to_string(),
            total_score: 100.0,
            games_played: 1,
            best_score: 100.0,
            first_place_count: 1,
        }])
    }

    #[test]
    fn missing_snapshot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RunSnapshot::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2025, 8, 4, 16, 0, 0).unwrap();
        let mut snap = RunSnapshot::new(&board(), Layout::DateColumns, 4, at);
        snap.last_alert_at = Some(at);
        snap.save(&dir.path().join("nested")).unwrap();

        let loaded = RunSnapshot::load(&dir.path().join("nested")).unwrap().unwrap();
        assert_eq!(loaded, snap);
        assert_eq!(loaded.leader.as_deref(), Some("Alice"));
    }

    #[test]
    fn corrupt_snapshot_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(RunSnapshot::path(dir.path()), "{not json").unwrap();
        assert!(matches!(RunSnapshot::load(dir.path()), Err(AppError::JsonError(_))));
    }

    #[test]
    fn alert_time_is_inherited() {
        let at = Utc.with_ymd_and_hms(2025, 8, 4, 16, 0, 0).unwrap();
        let mut previous = RunSnapshot::new(&board(), Layout::DateColumns, 4, at);
        previous.last_alert_at = Some(at);

        let later = Utc.with_ymd_and_hms(2025, 8, 5, 9, 0, 0).unwrap();
        let mut current = RunSnapshot::new(&board(), Layout::DateColumns, 5, later);
        current.inherit_alert(Some(&previous));
        assert_eq!(current.last_alert_at, Some(at));
        assert_eq!(current.age_minutes(later + chrono::Duration::minutes(30)), 30);
    }
}
