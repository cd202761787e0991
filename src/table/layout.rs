use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of the input worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// One row per player, one column per game date.
    DateColumns,
    /// One row per game with explicit 1st/2nd/3rd place columns.
    RankedRows,
}

/// How first-place credit is decided for a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinRule {
    /// Only the sole holder of a game's maximum score wins it.
    UniqueMaximum,
    /// The table names the winner; no tie detection.
    ExplicitFirst,
}

impl Layout {
    pub fn win_rule(self) -> WinRule {
        match self {
            Layout::DateColumns => WinRule::UniqueMaximum,
            Layout::RankedRows => WinRule::ExplicitFirst,
        }
    }

    /// Rendered row cap when none is configured.
    pub fn default_max_rows(self) -> Option<usize> {
        match self {
            Layout::DateColumns => None,
            Layout::RankedRows => Some(10),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::DateColumns => "date-columns",
            Layout::RankedRows => "ranked-rows",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date-columns" | "date_columns" | "dates" => Ok(Layout::DateColumns),
            "ranked-rows" | "ranked_rows" | "ranks" => Ok(Layout::RankedRows),
            other => Err(AppError::ConfigError(format!(
                "unknown layout '{}' (expected date-columns or ranked-rows)",
                other
            ))),
        }
    }
}

/// Finishing position named by a ranked-rows table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placing {
    First,
    Second,
    Third,
}

impl Placing {
    pub const ALL: [Placing; 3] = [Placing::First, Placing::Second, Placing::Third];

    pub fn name_header(self) -> &'static str {
        match self {
            Placing::First => "1st Place",
            Placing::Second => "2nd Place",
            Placing::Third => "3rd Place",
        }
    }

    pub fn score_header(self) -> &'static str {
        match self {
            Placing::First => "1st Score",
            Placing::Second => "2nd Score",
            Placing::Third => "3rd Score",
        }
    }
}

pub const NAME_HEADER: &str = "Name";
pub const DATE_HEADER: &str = "Date";

/// Column positions of a ranked-rows header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedColumns {
    pub date: Option<usize>,
    /// (name column, score column) for 1st, 2nd and 3rd place.
    pub places: [(usize, usize); 3],
}

impl RankedColumns {
    pub fn resolve(header: &[String]) -> Result<Self, AppError> {
        let find = |label: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(label))
        };
        let require = |label: &str| {
            find(label).ok_or_else(|| AppError::DataShape(format!("'{}' column not found", label)))
        };

        let mut places = [(0, 0); 3];
        for (slot, placing) in places.iter_mut().zip(Placing::ALL) {
            *slot = (require(placing.name_header())?, require(placing.score_header())?);
        }

        Ok(RankedColumns {
            date: find(DATE_HEADER),
            places,
        })
    }
}
