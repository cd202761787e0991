use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc, Weekday};

/// West Africa Time, UTC+1. The schedule and the sheet timestamps both use it.
pub const WAT_OFFSET_SECS: i32 = 3600;

pub fn wat() -> FixedOffset {
    FixedOffset::east_opt(WAT_OFFSET_SECS).expect("UTC+1 is a valid offset")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    Idle,
    AlertDue,
}

/// Fires on `weekday` during `hour` (WAT), every `period_weeks` weeks counted from `epoch`.
#[derive(Debug, Clone)]
pub struct AlertSchedule {
    pub epoch: DateTime<FixedOffset>,
    pub weekday: Weekday,
    pub hour: u32,
    pub period_weeks: i64,
}

impl AlertSchedule {
    /// Every other Monday at 17:00 WAT, starting 2025-07-21.
    pub fn biweekly() -> Self {
        let epoch = wat()
            .with_ymd_and_hms(2025, 7, 21, 17, 0, 0)
            .single()
            .expect("fixed offsets map every local time once");
        AlertSchedule {
            epoch,
            weekday: Weekday::Mon,
            hour: 17,
            period_weeks: 2,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&wat());
        if local < self.epoch {
            return false;
        }
        if local.weekday() != self.weekday || local.hour() != self.hour {
            return false;
        }

        let days = (local.date_naive() - self.epoch.date_naive()).num_days();
        (days / 7) % self.period_weeks == 0
    }

    /// Manual override forces an alert regardless of the calendar.
    pub fn check(&self, now: DateTime<Utc>, manual_override: bool) -> AlertState {
        if manual_override || self.is_due(now) {
            AlertState::AlertDue
        } else {
            AlertState::Idle
        }
    }
}

impl Default for AlertSchedule {
    fn default() -> Self {
        AlertSchedule::biweekly()
    }
}
