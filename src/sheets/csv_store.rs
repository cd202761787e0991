use crate::error::AppError;
use crate::render::grid::{CellRange, CellValue, DimensionSize};
use crate::render::theme::CellStyle;
use csv::{ReaderBuilder, WriterBuilder};
use std::path::{Path, PathBuf};

use super::store::SheetStore;

/// Worksheets as CSV files: `<dir>/<data sheet>.csv` in, `<dir>/<viz sheet>.csv` out.
///
/// Styling has no CSV representation and is accepted without effect.
pub struct CsvStore {
    input: PathBuf,
    output: PathBuf,
    grid: Vec<Vec<String>>,
}

impl CsvStore {
    pub fn open(dir: &Path, data_sheet: &str, viz_sheet: &str) -> Result<Self, AppError> {
        let input = dir.join(format!("{}.csv", data_sheet));
        if !input.is_file() {
            return Err(AppError::ConnectionFailure(format!(
                "'{}' sheet not found at {}",
                data_sheet,
                input.display()
            )));
        }

        log::info!("Using local table {}", input.display());
        Ok(CsvStore {
            input,
            output: dir.join(format!("{}.csv", viz_sheet)),
            grid: Vec::new(),
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    fn flush(&self) -> Result<(), AppError> {
        let width = self.grid.iter().map(Vec::len).max().unwrap_or(0);
        let mut writer = WriterBuilder::new().flexible(true).from_path(&self.output)?;
        for row in &self.grid {
            let mut record = row.clone();
            record.resize(width, String::new());
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl SheetStore for CsvStore {
    fn read_table(&mut self) -> Result<Vec<Vec<String>>, AppError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.input)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    fn clear_output(&mut self) -> Result<(), AppError> {
        self.grid.clear();
        self.flush()
    }

    fn write_values(&mut self, range: &CellRange, rows: &[Vec<CellValue>]) -> Result<(), AppError> {
        for (r, row) in rows.iter().enumerate() {
            let target_row = range.start.row + r;
            if self.grid.len() <= target_row {
                self.grid.resize(target_row + 1, Vec::new());
            }
            let line = &mut self.grid[target_row];
            for (c, value) in row.iter().enumerate() {
                let target_col = range.start.col + c;
                if line.len() <= target_col {
                    line.resize(target_col + 1, String::new());
                }
                line[target_col] = value.to_string();
            }
        }
        self.flush()
    }

    fn format_range(&mut self, range: &CellRange, _style: &CellStyle) -> Result<(), AppError> {
        log::debug!("Skipping format for {} (csv output)", range);
        Ok(())
    }

    fn merge_range(&mut self, _range: &CellRange) -> Result<(), AppError> {
        Ok(())
    }

    fn resize(&mut self, _sizes: &[DimensionSize]) -> Result<(), AppError> {
        Ok(())
    }
}
