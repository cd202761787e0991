use crate::render::grid::{CellRange, CellValue, Dimension, DimensionSize};
use crate::render::theme::{CellStyle, HorizontalAlign, Rgb};
use serde::{Deserialize, Serialize};

// Spreadsheet metadata (GET spreadsheets/{id}?fields=sheets.properties)
#[derive(Debug, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub grid_properties: Option<GridProperties>,
}

// values.get response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

// values.update body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueUpdate<'a> {
    pub range: String,
    pub major_dimension: &'static str,
    pub values: &'a [Vec<CellValue>],
}

#[derive(Debug, Serialize)]
pub struct BatchUpdate {
    pub requests: Vec<Request>,
}

#[derive(Debug, Deserialize)]
pub struct BatchUpdateResponse {
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(default)]
    pub add_sheet: Option<SheetEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    AddSheet(AddSheet),
    UpdateSheetProperties(UpdateSheetProperties),
    UnmergeCells(RangeOnly),
    UpdateCells(UpdateCells),
    RepeatCell(RepeatCell),
    MergeCells(MergeCells),
    UpdateDimensionProperties(UpdateDimensionProperties),
}

#[derive(Debug, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<usize>,
}

impl GridRange {
    pub fn whole_sheet(sheet_id: i64) -> Self {
        GridRange {
            sheet_id,
            ..Default::default()
        }
    }

    /// Inclusive cell range to the API's half-open indices.
    pub fn from_cells(sheet_id: i64, range: &CellRange) -> Self {
        GridRange {
            sheet_id,
            start_row_index: Some(range.start.row),
            end_row_index: Some(range.end.row + 1),
            start_column_index: Some(range.start.col),
            end_column_index: Some(range.end.col + 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    #[serde(default)]
    pub row_count: usize,
    #[serde(default)]
    pub column_count: usize,
}

impl GridProperties {
    /// The grid enlarged to hold `rows` x `cols`, or `None` if it already does.
    /// Never shrinks either dimension.
    pub fn grown_to(&self, rows: usize, cols: usize) -> Option<GridProperties> {
        if rows <= self.row_count && cols <= self.column_count {
            return None;
        }
        Some(GridProperties {
            row_count: self.row_count.max(rows),
            column_count: self.column_count.max(cols),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSheetProperties {
    pub title: String,
    pub grid_properties: GridProperties,
}

#[derive(Debug, Serialize)]
pub struct AddSheet {
    pub properties: NewSheetProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetGridUpdate {
    pub sheet_id: i64,
    pub grid_properties: GridProperties,
}

#[derive(Debug, Serialize)]
pub struct UpdateSheetProperties {
    pub properties: SheetGridUpdate,
    pub fields: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RangeOnly {
    pub range: GridRange,
}

#[derive(Debug, Serialize)]
pub struct UpdateCells {
    pub range: GridRange,
    pub fields: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFormat {
    pub foreground_color: Rgb,
    pub bold: bool,
    pub font_size: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    pub background_color: Rgb,
    pub text_format: TextFormat,
    pub horizontal_alignment: HorizontalAlign,
    pub vertical_alignment: &'static str,
}

impl From<&CellStyle> for CellFormat {
    fn from(style: &CellStyle) -> Self {
        CellFormat {
            background_color: style.background,
            text_format: TextFormat {
                foreground_color: style.foreground,
                bold: style.bold,
                font_size: style.font_size,
            },
            horizontal_alignment: style.align,
            vertical_alignment: "MIDDLE",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub user_entered_format: CellFormat,
}

#[derive(Debug, Serialize)]
pub struct RepeatCell {
    pub range: GridRange,
    pub cell: CellData,
    pub fields: &'static str,
}

impl RepeatCell {
    pub fn styled(range: GridRange, style: &CellStyle) -> Self {
        RepeatCell {
            range,
            cell: CellData {
                user_entered_format: style.into(),
            },
            fields: "userEnteredFormat(backgroundColor,textFormat,horizontalAlignment,verticalAlignment)",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeCells {
    pub range: GridRange,
    pub merge_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: Dimension,
    pub start_index: usize,
    pub end_index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionProperties {
    pub pixel_size: u32,
}

#[derive(Debug, Serialize)]
pub struct UpdateDimensionProperties {
    pub range: DimensionRange,
    pub properties: DimensionProperties,
    pub fields: &'static str,
}

impl UpdateDimensionProperties {
    pub fn sized(sheet_id: i64, size: &DimensionSize) -> Self {
        UpdateDimensionProperties {
            range: DimensionRange {
                sheet_id,
                dimension: size.dimension,
                start_index: size.start,
                end_index: size.end,
            },
            properties: DimensionProperties {
                pixel_size: size.pixels,
            },
            fields: "pixelSize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Theme;
    use serde_json::json;

    #[test]
    fn repeat_cell_payload_shape() {
        let style = Theme::standard().column_header();
        let req = Request::RepeatCell(RepeatCell::styled(
            GridRange::from_cells(7, &CellRange::row_span(3, 0, 7)),
            &style,
        ));
        let value = serde_json::to_value(&req).unwrap();

        let body = &value["repeatCell"];
        assert_eq!(
            body["range"],
            json!({
                "sheetId": 7,
                "startRowIndex": 3,
                "endRowIndex": 4,
                "startColumnIndex": 0,
                "endColumnIndex": 8
            })
        );
        let format = &body["cell"]["userEnteredFormat"];
        assert_eq!(format["horizontalAlignment"], "CENTER");
        assert_eq!(format["verticalAlignment"], "MIDDLE");
        assert_eq!(format["textFormat"]["bold"], true);
        assert_eq!(format["textFormat"]["fontSize"], 12);
        assert_eq!(format["textFormat"]["foregroundColor"]["red"], 1.0);
    }

    #[test]
    fn whole_sheet_range_omits_indices() {
        let req = Request::UnmergeCells(RangeOnly {
            range: GridRange::whole_sheet(3),
        });
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "unmergeCells": { "range": { "sheetId": 3 } } })
        );
    }

    #[test]
    fn dimension_payload_shape() {
        let size = DimensionSize {
            dimension: Dimension::Columns,
            start: 1,
            end: 2,
            pixels: 250,
        };
        let req = Request::UpdateDimensionProperties(UpdateDimensionProperties::sized(9, &size));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "updateDimensionProperties": {
                    "range": { "sheetId": 9, "dimension": "COLUMNS", "startIndex": 1, "endIndex": 2 },
                    "properties": { "pixelSize": 250 },
                    "fields": "pixelSize"
                }
            })
        );
    }

    #[test]
    fn value_cells_serialize_as_numbers_or_strings() {
        let rows = vec![vec![CellValue::Int(1), CellValue::Text("Alice".to_string())]];
        let body = ValueUpdate {
            range: "'Viz'!A5:B5".to_string(),
            major_dimension: "ROWS",
            values: &rows,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "range": "'Viz'!A5:B5", "majorDimension": "ROWS", "values": [[1, "Alice"]] })
        );
    }

    #[test]
    fn metadata_carries_grid_size() {
        let meta: SpreadsheetMeta = serde_json::from_value(json!({
            "sheets": [
                { "properties": { "sheetId": 0, "title": "Team" } },
                {
                    "properties": {
                        "sheetId": 42,
                        "title": "Viz",
                        "gridProperties": { "rowCount": 200, "columnCount": 26 }
                    }
                }
            ]
        }))
        .unwrap();

        assert_eq!(meta.sheets[0].properties.grid_properties, None);
        assert_eq!(
            meta.sheets[1].properties.grid_properties,
            Some(GridProperties { row_count: 200, column_count: 26 })
        );
    }

    #[test]
    fn grid_only_grows() {
        let grid = GridProperties { row_count: 200, column_count: 26 };
        assert_eq!(grid.grown_to(18, 8), None);
        assert_eq!(grid.grown_to(200, 26), None);
        assert_eq!(
            grid.grown_to(250, 8),
            Some(GridProperties { row_count: 250, column_count: 26 })
        );

        let small = GridProperties { row_count: 50, column_count: 10 };
        assert_eq!(
            small.grown_to(60, 12),
            Some(GridProperties { row_count: 60, column_count: 12 })
        );
    }
}
