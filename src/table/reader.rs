use super::layout::{Layout, Placing, RankedColumns, DATE_HEADER, NAME_HEADER};
use super::{GameTable, ScoreRecord};
use crate::error::AppError;

/// Coerce a score cell to a number. Anything unparseable counts as 0.
pub fn coerce_score(cell: &str) -> f64 {
    let cleaned: String = cell.trim().chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

/// Parse raw worksheet values (first row = header) into score records.
pub fn parse_table(values: &[Vec<String>], layout: Layout) -> Result<GameTable, AppError> {
    let Some((header, rows)) = values.split_first() else {
        return Ok(GameTable::empty(layout));
    };

    match layout {
        Layout::DateColumns => parse_date_columns(header, rows),
        Layout::RankedRows => parse_ranked_rows(header, rows),
    }
}

/// Like [`parse_table`], but a malformed table degrades to an empty one.
pub fn read_table(values: &[Vec<String>], layout: Layout) -> GameTable {
    if values.is_empty() {
        log::warn!("No data found in sheet");
        return GameTable::empty(layout);
    }

    match parse_table(values, layout) {
        Ok(table) => {
            log::info!(
                "Read {} score records across {} games",
                table.records.len(),
                table.total_games()
            );
            table
        }
        Err(e) => {
            log::error!("{}", e);
            GameTable::empty(layout)
        }
    }
}

fn parse_date_columns(header: &[String], rows: &[Vec<String>]) -> Result<GameTable, AppError> {
    let name_col = header
        .iter()
        .position(|h| h.trim() == NAME_HEADER)
        .ok_or_else(|| AppError::DataShape(format!("'{}' column not found", NAME_HEADER)))?;

    let date_cols: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .filter(|(idx, h)| *idx != name_col && !h.trim().is_empty())
        .map(|(idx, h)| (idx, h.trim().to_string()))
        .collect();

    if date_cols.is_empty() {
        log::warn!("No date columns found in data");
    }

    let mut records = Vec::new();
    for row in rows {
        let player = cell(row, name_col);
        if player.is_empty() {
            continue;
        }

        for (col, date) in &date_cols {
            let score = coerce_score(cell(row, *col));
            if score > 0.0 {
                records.push(ScoreRecord {
                    player: player.to_string(),
                    score,
                    occurred_on: date.clone(),
                    source: *col,
                    placing: None,
                });
            }
        }
    }

    Ok(GameTable {
        layout: Layout::DateColumns,
        games: date_cols.into_iter().map(|(_, date)| date).collect(),
        records,
    })
}

fn parse_ranked_rows(header: &[String], rows: &[Vec<String>]) -> Result<GameTable, AppError> {
    let columns = RankedColumns::resolve(header)?;
    if columns.date.is_none() {
        log::warn!("'{}' column not found, games will be numbered", DATE_HEADER);
    }

    let mut games = Vec::new();
    let mut records = Vec::new();

    for (row_idx, row) in rows.iter().enumerate() {
        let label = columns
            .date
            .map(|c| cell(row, c))
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Game {}", row_idx + 1));

        let before = records.len();
        for (placing, (name_col, score_col)) in Placing::ALL.into_iter().zip(columns.places) {
            let player = cell(row, name_col);
            let score = coerce_score(cell(row, score_col));
            if player.is_empty() || score <= 0.0 {
                continue;
            }
            records.push(ScoreRecord {
                player: player.to_string(),
                score,
                occurred_on: label.clone(),
                source: row_idx,
                placing: Some(placing),
            });
        }

        if records.len() > before {
            games.push(label);
        }
    }

    Ok(GameTable {
        layout: Layout::RankedRows,
        games,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn coercion_never_fails() {
        assert_eq!(coerce_score("1,250"), 1250.0);
        assert_eq!(coerce_score(" 42 "), 42.0);
        assert_eq!(coerce_score(""), 0.0);
        assert_eq!(coerce_score("n/a"), 0.0);
        assert_eq!(coerce_score("NaN"), 0.0);
        assert_eq!(coerce_score("-5"), -5.0);
    }

    #[test]
    fn date_columns_emit_only_positive_scores() {
        let values = grid(&[
            &["Name", "01-Jan-2025", "08-Jan-2025"],
            &["Alice", "100", "0"],
            &["Bob", "", "75"],
            &["  ", "999", "999"],
            &["Cara", "oops", "-3"],
        ]);
        let table = parse_table(&values, Layout::DateColumns).unwrap();

        assert_eq!(table.games, vec!["01-Jan-2025", "08-Jan-2025"]);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].player, "Alice");
        assert_eq!(table.records[0].occurred_on, "01-Jan-2025");
        assert_eq!(table.records[1].player, "Bob");
        assert_eq!(table.records[1].score, 75.0);
        assert_eq!(table.last_game(), Some("08-Jan-2025"));
    }

    #[test]
    fn short_rows_treat_missing_cells_as_zero() {
        let values = grid(&[&["Name", "d1", "d2"], &["Alice", "10"]]);
        let table = parse_table(&values, Layout::DateColumns).unwrap();
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.total_games(), 2);
    }

    #[test]
    fn missing_name_header_is_a_shape_error() {
        let values = grid(&[&["Player", "d1"], &["Alice", "10"]]);
        let err = parse_table(&values, Layout::DateColumns).unwrap_err();
        assert!(matches!(err, AppError::DataShape(_)));
        assert!(read_table(&values, Layout::DateColumns).is_empty());
    }

    #[test]
    fn ranked_rows_carry_placings() {
        let values = grid(&[
            &["Date", "1st Place", "1st Score", "2nd Place", "2nd Score", "3rd Place", "3rd Score"],
            &["01-Jan-2025", "Alice", "9,100", "Bob", "8000", "", ""],
            &["", "", "", "", "", "", ""],
            &["", "Bob", "7000", "Cara", "0", "Alice", "5000"],
        ]);
        let table = parse_table(&values, Layout::RankedRows).unwrap();

        assert_eq!(table.games, vec!["01-Jan-2025", "Game 3"]);
        let placings: Vec<_> = table
            .records
            .iter()
            .map(|r| (r.player.as_str(), r.placing))
            .collect();
        assert_eq!(
            placings,
            vec![
                ("Alice", Some(Placing::First)),
                ("Bob", Some(Placing::Second)),
                ("Bob", Some(Placing::First)),
                ("Alice", Some(Placing::Third)),
            ]
        );
        assert_eq!(table.records[0].score, 9100.0);
    }

    #[test]
    fn empty_sheet_is_empty_table() {
        let table = read_table(&[], Layout::RankedRows);
        assert!(table.is_empty());
        assert_eq!(table.total_games(), 0);
    }
}
