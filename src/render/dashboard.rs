use super::grid::{CellRange, CellRef, CellValue, Dimension, DimensionSize};
use super::number::{percent_1dp, thousands, thousands_1dp};
use super::theme::{CellStyle, Theme};
use crate::analysis::{Leaderboard, PlayerStats};
use crate::notify::schedule::wat;
use chrono::{DateTime, NaiveDate, Utc};

pub const TITLE: &str = "KAHOOT GAMES LEADERBOARD";
pub const SUMMARY_TITLE: &str = "SUMMARY STATISTICS";
pub const NO_DATA: &str = "No data";
pub const HEADERS: [&str; 8] = [
    "RANK",
    "PLAYER",
    "TOTAL SCORE",
    "GAMES PLAYED",
    "BEST SCORE",
    "AVG SCORE",
    "WIN RATE",
    "BADGES",
];

/// Wins needed for the streak badge.
pub const HOT_STREAK_WINS: usize = 2;
/// Single-game score needed for the star badge.
pub const STAR_SCORE: f64 = 9000.0;

const LAST_COL: usize = HEADERS.len() - 1;
const TITLE_ROW: usize = 0;
const SUBTITLE_ROW: usize = 1;
const HEADER_ROW: usize = 3;
const FIRST_DATA_ROW: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Badge {
    Champion,
    RunnerUp,
    ThirdPlace,
    HotStreak,
    Star,
}

impl Badge {
    pub fn emoji(self) -> &'static str {
        match self {
            Badge::Champion => "🏆",
            Badge::RunnerUp => "🥈",
            Badge::ThirdPlace => "🥉",
            Badge::HotStreak => "🔥",
            Badge::Star => "⭐",
        }
    }

    pub fn for_player(rank: usize, stats: &PlayerStats) -> Vec<Badge> {
        let mut badges = Vec::new();
        match rank {
            1 => badges.push(Badge::Champion),
            2 => badges.push(Badge::RunnerUp),
            3 => badges.push(Badge::ThirdPlace),
            _ => {}
        }
        if stats.first_place_count >= HOT_STREAK_WINS {
            badges.push(Badge::HotStreak);
        }
        if stats.best_score >= STAR_SCORE {
            badges.push(Badge::Star);
        }
        badges
    }
}

/// One display-ready leaderboard line.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedRow {
    pub rank: usize,
    pub player: String,
    pub total_score: String,
    pub games_played: usize,
    pub best_score: String,
    pub avg_score: String,
    pub win_rate: String,
    pub badges: Vec<Badge>,
}

impl RankedRow {
    pub fn new(rank: usize, stats: &PlayerStats) -> Self {
        RankedRow {
            rank,
            player: stats.player.clone(),
            total_score: thousands(stats.total_score),
            games_played: stats.games_played,
            best_score: thousands(stats.best_score),
            avg_score: thousands_1dp(stats.avg_score()),
            win_rate: percent_1dp(stats.win_rate()),
            badges: Badge::for_player(rank, stats),
        }
    }

    pub fn badge_text(&self) -> String {
        self.badges
            .iter()
            .map(|b| b.emoji())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn cells(&self) -> Vec<CellValue> {
        vec![
            self.rank.into(),
            self.player.as_str().into(),
            self.total_score.as_str().into(),
            self.games_played.into(),
            self.best_score.as_str().into(),
            self.avg_score.as_str().into(),
            self.win_rate.as_str().into(),
            self.badge_text().into(),
        ]
    }
}

pub fn ranked_rows(board: &Leaderboard, max_rows: Option<usize>) -> Vec<RankedRow> {
    let shown = match max_rows {
        Some(n) => board.top(n),
        None => board.entries(),
    };
    shown
        .iter()
        .enumerate()
        .map(|(idx, stats)| RankedRow::new(idx + 1, stats))
        .collect()
}

/// Figures shown under the table.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub total_players: usize,
    pub total_games: usize,
    pub current_leader: String,
    pub highest_score: String,
    pub average_score: String,
    pub total_participations: usize,
}

impl Summary {
    pub fn new(board: &Leaderboard, total_games: usize) -> Self {
        let (holder, best) = board.highest_score().unwrap_or((NO_DATA, 0.0));
        Summary {
            total_players: board.len(),
            total_games,
            current_leader: board
                .leader()
                .map(|p| p.player.clone())
                .unwrap_or_else(|| NO_DATA.to_string()),
            highest_score: format!("{} ({})", thousands(best), holder),
            average_score: thousands_1dp(board.average_score()),
            total_participations: board.total_participations(),
        }
    }

    pub fn lines(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("Total Players:", self.total_players.into()),
            ("Total Games Played:", self.total_games.into()),
            ("Current Leader:", self.current_leader.as_str().into()),
            ("Highest Score Ever:", self.highest_score.as_str().into()),
            ("Average Score (All Players):", self.average_score.as_str().into()),
            ("Total Participations:", self.total_participations.into()),
        ]
    }
}

/// Inputs to a render besides the leaderboard itself.
#[derive(Clone, Debug)]
pub struct DashboardContext {
    pub total_games: usize,
    pub last_game: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub max_rows: Option<usize>,
}

/// Second line of the sheet: last game date, or the render time in WAT.
pub fn freshness_line(last_game: Option<&str>, generated_at: DateTime<Utc>) -> String {
    match last_game {
        Some(label) => {
            let shown = NaiveDate::parse_from_str(label, "%d-%b-%Y")
                .map(|d| d.format("%d-%b-%Y").to_string())
                .unwrap_or_else(|_| label.to_string());
            format!("Last Game: {}", shown)
        }
        None => format!(
            "Last Updated: {}",
            generated_at
                .with_timezone(&wat())
                .format("%d-%b-%Y %I:%M:%S %p WAT")
        ),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValueBlock {
    pub range: CellRange,
    pub rows: Vec<Vec<CellValue>>,
}

/// A full render of the output sheet: values, styling, merges and sizes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dashboard {
    pub values: Vec<ValueBlock>,
    pub formats: Vec<(CellRange, CellStyle)>,
    pub merges: Vec<CellRange>,
    pub dimensions: Vec<DimensionSize>,
}

impl Dashboard {
    fn put(&mut self, top_left: CellRef, rows: Vec<Vec<CellValue>>) {
        self.values.push(ValueBlock {
            range: CellRange::block(top_left, &rows),
            rows,
        });
    }

    fn banner(&mut self, row: usize, text: &str, style: CellStyle) {
        let span = CellRange::row_span(row, 0, LAST_COL);
        self.put(CellRef::new(row, 0), vec![vec![text.into()]]);
        self.formats.push((span, style));
        self.merges.push(span);
    }

    /// Text of the cell at `(row, col)`, if any block covers it.
    pub fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        self.values.iter().find_map(|block| {
            let r = row.checked_sub(block.range.start.row)?;
            let c = col.checked_sub(block.range.start.col)?;
            block.rows.get(r)?.get(c).map(|v| v.to_string())
        })
    }
}

pub fn build_dashboard(board: &Leaderboard, ctx: &DashboardContext, theme: &Theme) -> Dashboard {
    let mut dash = Dashboard::default();

    dash.banner(TITLE_ROW, TITLE, theme.title());
    let freshness = freshness_line(ctx.last_game.as_deref(), ctx.generated_at);
    dash.banner(SUBTITLE_ROW, &freshness, theme.subtitle());

    dash.put(
        CellRef::new(HEADER_ROW, 0),
        vec![HEADERS.iter().map(|h| CellValue::from(*h)).collect()],
    );
    dash.formats
        .push((CellRange::row_span(HEADER_ROW, 0, LAST_COL), theme.column_header()));

    let rows = ranked_rows(board, ctx.max_rows);
    if !rows.is_empty() {
        dash.put(
            CellRef::new(FIRST_DATA_ROW, 0),
            rows.iter().map(RankedRow::cells).collect(),
        );
        for (idx, row) in rows.iter().enumerate() {
            dash.formats.push((
                CellRange::row_span(FIRST_DATA_ROW + idx, 0, LAST_COL),
                theme.ranked_row(row.rank, idx),
            ));
        }
    }

    let summary_row = FIRST_DATA_ROW + rows.len() + 1;
    dash.banner(summary_row, SUMMARY_TITLE, theme.summary_header());

    let lines = Summary::new(board, ctx.total_games).lines();
    let first_line = summary_row + 1;
    for idx in 0..lines.len() {
        dash.formats
            .push((CellRange::row_span(first_line + idx, 0, 1), theme.summary_line()));
    }
    dash.put(
        CellRef::new(first_line, 0),
        lines
            .into_iter()
            .map(|(label, value)| vec![label.into(), value])
            .collect(),
    );

    for (col, width) in theme.column_widths.iter().enumerate() {
        dash.dimensions.push(DimensionSize {
            dimension: Dimension::Columns,
            start: col,
            end: col + 1,
            pixels: *width,
        });
    }
    dash.dimensions.push(DimensionSize {
        dimension: Dimension::Rows,
        start: HEADER_ROW,
        end: HEADER_ROW + 1,
        pixels: theme.header_row_height,
    });
    if !rows.is_empty() {
        dash.dimensions.push(DimensionSize {
            dimension: Dimension::Rows,
            start: FIRST_DATA_ROW,
            end: FIRST_DATA_ROW + rows.len(),
            pixels: theme.data_row_height,
        });
    }

    dash
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stats(player: &str, total: f64, games: usize, best: f64, wins: usize) -> PlayerStats {
        PlayerStats {
            player: player.to_string(),
            total_score: total,
            games_played: games,
            best_score: best,
            first_place_count: wins,
        }
    }

    fn ctx(max_rows: Option<usize>) -> DashboardContext {
        DashboardContext {
            total_games: 5,
            last_game: Some("04-Aug-2025".to_string()),
            generated_at: Utc.with_ymd_and_hms(2025, 8, 4, 16, 30, 0).unwrap(),
            max_rows,
        }
    }

    fn sample() -> Leaderboard {
        Leaderboard::from_entries(vec![
            stats("Alice", 25_300.0, 4, 9_100.0, 3),
            stats("Bob", 12_000.0, 3, 5_000.0, 1),
            stats("Cara", 4_000.0, 2, 2_500.0, 0),
            stats("Dan", 900.0, 1, 900.0, 0),
        ])
    }

    #[test]
    fn badges_follow_rank_and_thresholds() {
        let rows = ranked_rows(&sample(), None);
        assert_eq!(rows[0].badge_text(), "🏆 🔥 ⭐");
        assert_eq!(rows[1].badge_text(), "🥈");
        assert_eq!(rows[2].badge_text(), "🥉");
        assert_eq!(rows[3].badge_text(), "");
    }

    #[test]
    fn ranked_row_formatting() {
        let row = RankedRow::new(1, &stats("Alice", 25_300.0, 4, 9_100.0, 3));
        assert_eq!(row.total_score, "25,300");
        assert_eq!(row.best_score, "9,100");
        assert_eq!(row.avg_score, "6,325.0");
        assert_eq!(row.win_rate, "75.0%");
    }

    #[test]
    fn grid_layout() {
        let dash = build_dashboard(&sample(), &ctx(None), &Theme::standard());

        assert_eq!(dash.cell_text(0, 0).as_deref(), Some(TITLE));
        assert_eq!(dash.cell_text(1, 0).as_deref(), Some("Last Game: 04-Aug-2025"));
        assert_eq!(dash.cell_text(3, 7).as_deref(), Some("BADGES"));
        assert_eq!(dash.cell_text(4, 1).as_deref(), Some("Alice"));
        assert_eq!(dash.cell_text(7, 0).as_deref(), Some("4"));
        // four data rows, a gap, then the summary
        assert_eq!(dash.cell_text(9, 0).as_deref(), Some(SUMMARY_TITLE));
        assert_eq!(dash.cell_text(10, 1).as_deref(), Some("4"));
        assert_eq!(dash.cell_text(11, 1).as_deref(), Some("5"));
        assert_eq!(dash.cell_text(12, 1).as_deref(), Some("Alice"));
        assert_eq!(dash.cell_text(13, 1).as_deref(), Some("9,100 (Alice)"));
        assert_eq!(dash.cell_text(15, 1).as_deref(), Some("10"));

        let merged: Vec<String> = dash.merges.iter().map(|m| m.to_string()).collect();
        assert_eq!(merged, vec!["A1:H1", "A2:H2", "A10:H10"]);
        assert_eq!(dash.dimensions.len(), 10);
    }

    #[test]
    fn row_cap_limits_table_but_not_summary() {
        let dash = build_dashboard(&sample(), &ctx(Some(2)), &Theme::standard());
        assert_eq!(dash.cell_text(5, 1).as_deref(), Some("Bob"));
        assert_eq!(dash.cell_text(7, 0).as_deref(), Some(SUMMARY_TITLE));
        assert_eq!(dash.cell_text(8, 1).as_deref(), Some("4"));
    }

    #[test]
    fn empty_board_renders_placeholders() {
        let context = DashboardContext {
            total_games: 0,
            last_game: None,
            generated_at: Utc.with_ymd_and_hms(2025, 7, 21, 16, 5, 9).unwrap(),
            max_rows: None,
        };
        let dash = build_dashboard(&Leaderboard::default(), &context, &Theme::standard());

        assert_eq!(
            dash.cell_text(1, 0).as_deref(),
            Some("Last Updated: 21-Jul-2025 05:05:09 PM WAT")
        );
        assert_eq!(dash.cell_text(5, 0).as_deref(), Some(SUMMARY_TITLE));
        assert_eq!(dash.cell_text(8, 1).as_deref(), Some(NO_DATA));
        assert_eq!(dash.cell_text(9, 1).as_deref(), Some("0 (No data)"));
        assert_eq!(dash.cell_text(10, 1).as_deref(), Some("0.0"));
        assert!(!dash
            .dimensions
            .iter()
            .any(|d| d.dimension == Dimension::Rows && d.start == FIRST_DATA_ROW));
    }

    #[test]
    fn unparseable_last_game_is_shown_verbatim() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(freshness_line(Some("Game 3"), at), "Last Game: Game 3");
        assert_eq!(freshness_line(Some("1-Jan-2025"), at), "Last Game: 01-Jan-2025");
    }
}
