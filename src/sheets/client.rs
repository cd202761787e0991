use crate::error::AppError;
use crate::render::grid::{CellRange, CellValue, DimensionSize};
use crate::render::theme::CellStyle;
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::models::*;
use super::store::SheetStore;

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const NEW_SHEET_ROWS: usize = 50;
const NEW_SHEET_COLS: usize = 10;

/// Where one worksheet of the spreadsheet lives.
#[derive(Debug, Clone)]
pub struct SheetTarget {
    pub spreadsheet_id: String,
    pub access_token: String,
    pub data_sheet: String,
    pub viz_sheet: String,
}

/// Whether connecting may create the output worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadWrite,
    /// Never creates anything; writes fail if the output sheet is missing.
    ReadOnly,
}

/// What `connect` does about the output worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSheet {
    Found { sheet_id: i64, grid: GridProperties },
    Create,
    Absent,
}

impl OutputSheet {
    pub fn locate(meta: &SpreadsheetMeta, title: &str, access: Access) -> OutputSheet {
        let found = meta.sheets.iter().find(|s| s.properties.title == title);
        match (found, access) {
            (Some(entry), _) => OutputSheet::Found {
                sheet_id: entry.properties.sheet_id,
                grid: entry.properties.grid_properties.unwrap_or(NEW_SHEET_GRID),
            },
            (None, Access::ReadWrite) => OutputSheet::Create,
            (None, Access::ReadOnly) => OutputSheet::Absent,
        }
    }
}

const NEW_SHEET_GRID: GridProperties = GridProperties {
    row_count: NEW_SHEET_ROWS,
    column_count: NEW_SHEET_COLS,
};

pub struct SheetsClient {
    target: SheetTarget,
    viz_sheet_id: Option<i64>,
    viz_grid: GridProperties,
    agent: ureq::Agent,
    clock: DefaultClock,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

/// `'Sheet'!A1:B2`, quoting the sheet title.
pub fn a1_range(sheet: &str, range: Option<&CellRange>) -> String {
    let quoted = format!("'{}'", sheet.replace('\'', "''"));
    match range {
        Some(r) => format!("{}!{}", quoted, r),
        None => quoted,
    }
}

pub fn spreadsheet_url(spreadsheet_id: &str) -> String {
    format!("{}/{}", API_BASE, urlencoding::encode(spreadsheet_id))
}

pub fn values_url(spreadsheet_id: &str, range: &str) -> String {
    format!(
        "{}/values/{}",
        spreadsheet_url(spreadsheet_id),
        urlencoding::encode(range)
    )
}

impl SheetsClient {
    /// Open the spreadsheet, check the input worksheet exists and create the
    /// output worksheet if it is missing.
    pub fn connect(target: SheetTarget) -> Result<Self, AppError> {
        Self::open(target, Access::ReadWrite)
    }

    /// Open the spreadsheet for reading only. Nothing is created.
    pub fn connect_read_only(target: SheetTarget) -> Result<Self, AppError> {
        Self::open(target, Access::ReadOnly)
    }

    fn open(target: SheetTarget, access: Access) -> Result<Self, AppError> {
        // Sheets allows 60 writes per minute per user; stay a little under
        let rate_limiter = RateLimiter::direct(Quota::per_minute(NonZeroU32::new(55).unwrap()));
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(60))
            .build();

        let mut client = SheetsClient {
            target,
            viz_sheet_id: None,
            viz_grid: NEW_SHEET_GRID,
            agent,
            clock: DefaultClock::default(),
            rate_limiter,
        };

        let meta: SpreadsheetMeta = client
            .execute(
                "GET",
                &format!("{}?fields=sheets.properties", client.spreadsheet_url()),
                None::<&()>,
            )
            .map_err(|e| AppError::ConnectionFailure(e.to_string()))?;

        if !meta
            .sheets
            .iter()
            .any(|s| s.properties.title == client.target.data_sheet)
        {
            return Err(AppError::ConnectionFailure(format!(
                "'{}' sheet not found",
                client.target.data_sheet
            )));
        }

        match OutputSheet::locate(&meta, &client.target.viz_sheet, access) {
            OutputSheet::Found { sheet_id, grid } => {
                client.viz_sheet_id = Some(sheet_id);
                client.viz_grid = grid;
            }
            OutputSheet::Create => {
                log::info!("'{}' sheet not found, creating it...", client.target.viz_sheet);
                let sheet_id = client
                    .add_sheet()
                    .map_err(|e| AppError::ConnectionFailure(e.to_string()))?;
                client.viz_sheet_id = Some(sheet_id);
            }
            OutputSheet::Absent => {
                log::debug!("'{}' sheet not found, leaving it absent", client.target.viz_sheet);
            }
        }

        log::info!("Successfully connected to Google Sheets");
        Ok(client)
    }

    fn spreadsheet_url(&self) -> String {
        spreadsheet_url(&self.target.spreadsheet_id)
    }

    fn values_url(&self, range: &str) -> String {
        values_url(&self.target.spreadsheet_id, range)
    }

    fn viz_id(&self) -> Result<i64, AppError> {
        self.viz_sheet_id.ok_or_else(|| {
            AppError::ConnectionFailure(format!(
                "'{}' sheet does not exist (opened read-only)",
                self.target.viz_sheet
            ))
        })
    }

    fn throttle(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn execute<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &str,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, AppError> {
        let mut retry_count = 0;
        const MAX_RETRIES: u32 = 3;

        loop {
            self.throttle();

            let request = self
                .agent
                .request(method, url)
                .set("Authorization", &format!("Bearer {}", self.target.access_token))
                .set("User-Agent", "kahoot_board/0.1.0");

            let response = match body {
                Some(b) => request.send_json(b),
                None => request.call(),
            };

            match response {
                Ok(resp) => {
                    return resp
                        .into_json::<T>()
                        .map_err(|e| AppError::JsonError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    log::warn!("Rate limited, waiting {}ms before retry...", wait_ms);
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, resp)) => {
                    let detail = resp.into_string().unwrap_or_default();
                    return Err(AppError::HttpError(format!("HTTP {}: {}", code, detail.trim())));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    fn batch_update(&self, requests: Vec<Request>) -> Result<BatchUpdateResponse, AppError> {
        let url = format!("{}:batchUpdate", self.spreadsheet_url());
        self.execute("POST", &url, Some(&BatchUpdate { requests }))
    }

    fn add_sheet(&self) -> Result<i64, AppError> {
        let reply = self.batch_update(vec![Request::AddSheet(AddSheet {
            properties: NewSheetProperties {
                title: self.target.viz_sheet.clone(),
                grid_properties: NEW_SHEET_GRID,
            },
        })])?;

        reply
            .replies
            .into_iter()
            .find_map(|r| r.add_sheet)
            .map(|s| s.properties.sheet_id)
            .ok_or_else(|| AppError::JsonError("addSheet reply missing sheet properties".to_string()))
    }
}

impl SheetStore for SheetsClient {
    fn read_table(&mut self) -> Result<Vec<Vec<String>>, AppError> {
        let url = self.values_url(&a1_range(&self.target.data_sheet, None));
        let range: ValueRange = self.execute("GET", &url, None::<&()>)?;
        log::debug!("Fetched {} rows from {}", range.values.len(), range.range);
        Ok(range.values)
    }

    fn reserve(&mut self, rows: usize, cols: usize) -> Result<(), AppError> {
        let Some(grid) = self.viz_grid.grown_to(rows, cols) else {
            return Ok(());
        };
        self.batch_update(vec![Request::UpdateSheetProperties(UpdateSheetProperties {
            properties: SheetGridUpdate {
                sheet_id: self.viz_id()?,
                grid_properties: grid,
            },
            fields: "gridProperties(rowCount,columnCount)",
        })])?;
        self.viz_grid = grid;
        Ok(())
    }

    fn clear_output(&mut self) -> Result<(), AppError> {
        let whole = GridRange::whole_sheet(self.viz_id()?);
        self.batch_update(vec![
            Request::UnmergeCells(RangeOnly { range: whole.clone() }),
            Request::UpdateCells(UpdateCells {
                range: whole,
                fields: "*",
            }),
        ])?;
        Ok(())
    }

    fn write_values(&mut self, range: &CellRange, rows: &[Vec<CellValue>]) -> Result<(), AppError> {
        self.viz_id()?;
        let a1 = a1_range(&self.target.viz_sheet, Some(range));
        let url = format!("{}?valueInputOption=RAW", self.values_url(&a1));
        let body = ValueUpdate {
            range: a1,
            major_dimension: "ROWS",
            values: rows,
        };
        let _: serde_json::Value = self.execute("PUT", &url, Some(&body))?;
        Ok(())
    }

    fn format_range(&mut self, range: &CellRange, style: &CellStyle) -> Result<(), AppError> {
        self.batch_update(vec![Request::RepeatCell(RepeatCell::styled(
            GridRange::from_cells(self.viz_id()?, range),
            style,
        ))])?;
        Ok(())
    }

    fn merge_range(&mut self, range: &CellRange) -> Result<(), AppError> {
        self.batch_update(vec![Request::MergeCells(MergeCells {
            range: GridRange::from_cells(self.viz_id()?, range),
            merge_type: "MERGE_ALL",
        })])?;
        Ok(())
    }

    fn resize(&mut self, sizes: &[DimensionSize]) -> Result<(), AppError> {
        if sizes.is_empty() {
            return Ok(());
        }
        let sheet_id = self.viz_id()?;
        let requests = sizes
            .iter()
            .map(|s| Request::UpdateDimensionProperties(UpdateDimensionProperties::sized(sheet_id, s)))
            .collect();
        self.batch_update(requests)?;
        Ok(())
    }
}
