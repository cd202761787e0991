//! Shared fixtures: an in-memory spreadsheet and a recording notifier.

#![allow(dead_code)]

use kahoot_board::analysis::Leaderboard;
use kahoot_board::config::{Config, StoreKind};
use kahoot_board::error::AppError;
use kahoot_board::notify::{Delivery, Notifier};
use kahoot_board::render::grid::{CellRange, CellValue, DimensionSize};
use kahoot_board::render::theme::CellStyle;
use kahoot_board::sheets::SheetStore;
use kahoot_board::table::Layout;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

#[derive(Default)]
pub struct MemoryStore {
    pub input: Vec<Vec<String>>,
    pub fail_reads: bool,
    pub fail_formats: bool,
    pub cells: HashMap<(usize, usize), String>,
    pub clears: usize,
    pub formats: Vec<CellRange>,
    pub merges: Vec<CellRange>,
    pub resizes: usize,
}

impl MemoryStore {
    pub fn with_rows(rows: &[&[&str]]) -> Self {
        MemoryStore {
            input: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
            ..Default::default()
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(&(row, col)).map(String::as_str)
    }
}

impl SheetStore for MemoryStore {
    fn read_table(&mut self) -> Result<Vec<Vec<String>>, AppError> {
        if self.fail_reads {
            return Err(AppError::HttpError("HTTP 503".to_string()));
        }
        Ok(self.input.clone())
    }

    fn clear_output(&mut self) -> Result<(), AppError> {
        self.clears += 1;
        self.cells.clear();
        self.formats.clear();
        self.merges.clear();
        Ok(())
    }

    fn write_values(&mut self, range: &CellRange, rows: &[Vec<CellValue>]) -> Result<(), AppError> {
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                self.cells
                    .insert((range.start.row + r, range.start.col + c), value.to_string());
            }
        }
        Ok(())
    }

    fn format_range(&mut self, range: &CellRange, _style: &CellStyle) -> Result<(), AppError> {
        if self.fail_formats && range.start.row % 2 == 1 {
            return Err(AppError::HttpError("HTTP 500".to_string()));
        }
        self.formats.push(*range);
        Ok(())
    }

    fn merge_range(&mut self, range: &CellRange) -> Result<(), AppError> {
        self.merges.push(*range);
        Ok(())
    }

    fn resize(&mut self, _sizes: &[DimensionSize]) -> Result<(), AppError> {
        self.resizes += 1;
        Ok(())
    }
}

/// Remembers every alert instead of posting it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: RefCell<Vec<(Vec<String>, usize)>>,
    pub fail: bool,
}

impl Notifier for RecordingNotifier {
    fn send(&self, board: &Leaderboard, total_games: usize) -> Result<Delivery, AppError> {
        if self.fail {
            return Err(AppError::NotificationFailure("HTTP 404".to_string()));
        }
        let names = board.top(3).iter().map(|p| p.player.clone()).collect();
        self.sent.borrow_mut().push((names, total_games));
        Ok(Delivery::Sent)
    }
}

pub fn config(layout: Layout, data_dir: &Path) -> Config {
    Config {
        store: StoreKind::Csv,
        sheet_id: None,
        access_token: None,
        data_sheet: "Team".to_string(),
        viz_sheet: "Viz".to_string(),
        layout,
        max_rows: None,
        data_dir: data_dir.to_path_buf(),
        webhook_url: None,
        manual_trigger: false,
        scheduled_run: true,
    }
}
