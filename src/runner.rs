//! One compute-and-publish pass, and the modes that drive it.
//!
//! - `refresh`: read the table, rank players, rewrite the dashboard.
//! - `run_scheduled`: refresh and alert when the calendar (or a manual
//!   override) says so. Meant to be fired by an external scheduler.
//! - `watch`: refresh on a fixed interval until stopped; a failed cycle is
//!   logged and retried on the next tick.

use crate::analysis::Leaderboard;
use crate::config::Config;
use crate::error::AppError;
use crate::notify::{compose_message, AlertSchedule, AlertState, Delivery, Notifier};
use crate::render::{build_dashboard, DashboardContext, Theme};
use crate::sheets::{publish, PublishReport, SheetStore};
use crate::snapshot::RunSnapshot;
use crate::table::{read_table, GameTable};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Shortest pause between watch cycles.
pub const MIN_WATCH_INTERVAL: Duration = Duration::from_secs(1);

/// Result of a refresh that had data to show.
#[derive(Debug)]
pub struct Refreshed {
    pub table: GameTable,
    pub leaderboard: Leaderboard,
    pub report: PublishReport,
}

#[derive(Debug, PartialEq)]
pub enum ScheduledOutcome {
    /// Not an alert slot; nothing was touched.
    Skipped,
    /// Alert was due but the table had nothing to report.
    NoData,
    Alerted(Delivery),
    /// Alert was due; the message is returned instead of posted.
    DryRun(String),
}

pub struct Runner<'a> {
    store: &'a mut dyn SheetStore,
    config: &'a Config,
    theme: Theme,
}

impl<'a> Runner<'a> {
    pub fn new(store: &'a mut dyn SheetStore, config: &'a Config) -> Self {
        Runner {
            store,
            config,
            theme: Theme::standard(),
        }
    }

    /// Read and rank. A read failure counts as an empty table.
    pub fn load(&mut self) -> (GameTable, Leaderboard) {
        let values = match self.store.read_table() {
            Ok(values) => values,
            Err(e) => {
                log::error!("Failed to read data: {}", e);
                Vec::new()
            }
        };
        let table = read_table(&values, self.config.layout);
        let leaderboard = Leaderboard::from_table(&table);
        (table, leaderboard)
    }

    /// Rebuild the dashboard. `Ok(None)` when there was nothing to show.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Result<Option<Refreshed>, AppError> {
        log::info!("Refreshing dashboard...");

        let (table, leaderboard) = self.load();
        if leaderboard.is_empty() {
            log::warn!("No data available for dashboard");
            return Ok(None);
        }

        let ctx = DashboardContext {
            total_games: table.total_games(),
            last_game: table.last_game().map(str::to_string),
            generated_at: now,
            max_rows: self.config.row_limit(),
        };
        let dash = build_dashboard(&leaderboard, &ctx, &self.theme);
        let report = publish(&mut *self.store, &dash)?;

        let mut snapshot = RunSnapshot::new(&leaderboard, table.layout, table.total_games(), now);
        let previous = RunSnapshot::load(&self.config.data_dir).ok().flatten();
        snapshot.inherit_alert(previous.as_ref());
        if let Err(e) = snapshot.save(&self.config.data_dir) {
            log::warn!("Could not save run snapshot: {}", e);
        }

        log::info!("Dashboard refreshed successfully");
        Ok(Some(Refreshed {
            table,
            leaderboard,
            report,
        }))
    }

    /// Refresh and alert if an alert is due at `now`.
    ///
    /// Nothing suppresses a second alert inside the same hour.
    pub fn run_scheduled(
        &mut self,
        notifier: &dyn Notifier,
        schedule: &AlertSchedule,
        now: DateTime<Utc>,
        dry_run: bool,
    ) -> Result<ScheduledOutcome, AppError> {
        match schedule.check(now, self.config.manual_trigger) {
            AlertState::Idle => {
                log::info!("Not time for bi-weekly update - skipping dashboard refresh and alert");
                return Ok(ScheduledOutcome::Skipped);
            }
            AlertState::AlertDue if self.config.manual_trigger => {
                log::info!("Manual trigger detected - running dashboard update and alert...");
            }
            AlertState::AlertDue => {
                log::info!("Bi-weekly schedule - updating dashboard and sending alert...");
            }
        }

        self.refresh(now)?;

        let (table, leaderboard) = self.load();
        if leaderboard.is_empty() {
            log::warn!("No data available for alert");
            return Ok(ScheduledOutcome::NoData);
        }

        if dry_run {
            return Ok(ScheduledOutcome::DryRun(compose_message(
                &leaderboard,
                table.total_games(),
            )));
        }

        let delivery = match notifier.send(&leaderboard, table.total_games()) {
            Ok(delivery) => delivery,
            Err(e) => {
                log::error!("Failed to send chat alert: {}", e);
                Delivery::Skipped
            }
        };

        if delivery == Delivery::Sent {
            self.record_alert(now);
        }
        Ok(ScheduledOutcome::Alerted(delivery))
    }

    fn record_alert(&self, now: DateTime<Utc>) {
        match RunSnapshot::load(&self.config.data_dir) {
            Ok(Some(mut snap)) => {
                snap.last_alert_at = Some(now);
                if let Err(e) = snap.save(&self.config.data_dir) {
                    log::warn!("Could not save run snapshot: {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("Could not update run snapshot: {}", e),
        }
    }

    /// Refresh every `interval` until `cycles` refreshes ran (forever if `None`).
    /// Intervals below [`MIN_WATCH_INTERVAL`] are raised to it.
    pub fn watch(&mut self, interval: Duration, cycles: Option<usize>) {
        let interval = interval.max(MIN_WATCH_INTERVAL);
        log::info!("Starting auto-refresh with {} second intervals", interval.as_secs());

        let mut completed = 0;
        loop {
            if let Err(e) = self.refresh(Utc::now()) {
                log::error!("Error during auto-refresh: {}", e);
            }
            completed += 1;
            if cycles.is_some_and(|max| completed >= max) {
                break;
            }

            log::info!("Next refresh in {} seconds...", interval.as_secs());
            wait_with_spinner(interval);
        }
    }
}

fn wait_with_spinner(interval: Duration) {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} next refresh in {msg}") {
        spinner.set_style(style);
    }

    let mut remaining = interval.as_secs();
    while remaining > 0 {
        spinner.set_message(format!("{}s", remaining));
        spinner.tick();
        std::thread::sleep(Duration::from_secs(1));
        remaining -= 1;
    }
    spinner.finish_and_clear();
}
