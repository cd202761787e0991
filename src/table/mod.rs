pub mod layout;
pub mod reader;

pub use layout::{Layout, Placing, WinRule};
pub use reader::{coerce_score, parse_table, read_table};

/// One player's result in one game.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub player: String,
    pub score: f64,
    /// Game label: the date header, or the row's date in ranked-rows tables.
    pub occurred_on: String,
    /// Column index (date-columns) or data row index (ranked-rows).
    pub source: usize,
    pub placing: Option<Placing>,
}

/// Everything the reader extracted from one worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct GameTable {
    pub layout: Layout,
    /// Game labels in table order.
    pub games: Vec<String>,
    pub records: Vec<ScoreRecord>,
}

impl GameTable {
    pub fn empty(layout: Layout) -> Self {
        GameTable {
            layout,
            games: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_games(&self) -> usize {
        self.games.len()
    }

    pub fn last_game(&self) -> Option<&str> {
        self.games.last().map(String::as_str)
    }
}
