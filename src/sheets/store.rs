use crate::error::AppError;
use crate::render::grid::{CellRange, CellValue, DimensionSize};
use crate::render::theme::CellStyle;
use crate::render::Dashboard;

/// A spreadsheet that holds the input table and receives the dashboard.
pub trait SheetStore {
    /// All values of the input worksheet, header row first.
    fn read_table(&mut self) -> Result<Vec<Vec<String>>, AppError>;

    /// Grow the output worksheet to at least `rows` x `cols` cells. A larger
    /// grid is left as it is.
    fn reserve(&mut self, _rows: usize, _cols: usize) -> Result<(), AppError> {
        Ok(())
    }

    /// Drop every value, format and merge on the output worksheet.
    fn clear_output(&mut self) -> Result<(), AppError>;

    fn write_values(&mut self, range: &CellRange, rows: &[Vec<CellValue>]) -> Result<(), AppError>;

    fn format_range(&mut self, range: &CellRange, style: &CellStyle) -> Result<(), AppError>;

    fn merge_range(&mut self, range: &CellRange) -> Result<(), AppError>;

    fn resize(&mut self, sizes: &[DimensionSize]) -> Result<(), AppError>;
}

/// What happened during one [`publish`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub blocks_written: usize,
    pub formats_applied: usize,
    pub formats_failed: usize,
    pub resized: bool,
}

/// Rewrite the output worksheet with `dash`.
///
/// Value writes are fatal. Styling is best effort: a failed format or merge
/// is logged and the rest of the render carries on.
pub fn publish<S: SheetStore + ?Sized>(store: &mut S, dash: &Dashboard) -> Result<PublishReport, AppError> {
    let mut report = PublishReport::default();

    let (rows, cols) = dash
        .values
        .iter()
        .map(|b| (b.range.end.row + 1, b.range.end.col + 1))
        .fold((0, 0), |(r, c), (br, bc)| (r.max(br), c.max(bc)));
    store.reserve(rows, cols)?;
    store.clear_output()?;

    for block in &dash.values {
        store.write_values(&block.range, &block.rows)?;
        report.blocks_written += 1;
    }

    for (range, style) in &dash.formats {
        match store.format_range(range, style) {
            Ok(()) => report.formats_applied += 1,
            Err(e) => {
                report.formats_failed += 1;
                log::error!(
                    "{}",
                    AppError::FormattingFailure {
                        range: range.to_string(),
                        reason: e.to_string(),
                    }
                );
            }
        }
    }

    for range in &dash.merges {
        if let Err(e) = store.merge_range(range) {
            log::error!("Failed to merge {}: {}", range, e);
        }
    }

    match store.resize(&dash.dimensions) {
        Ok(()) => report.resized = true,
        Err(e) => log::warn!("Could not set column widths: {}", e),
    }

    log::info!("Dashboard created successfully");
    Ok(report)
}
