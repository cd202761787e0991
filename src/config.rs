use crate::error::AppError;
use crate::table::Layout;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Where the input table lives and where the dashboard is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreKind {
    /// Google Sheets over its REST API.
    Sheets,
    /// CSV files in the data directory.
    Csv,
}

impl FromStr for StoreKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sheets" | "google" => Ok(StoreKind::Sheets),
            "csv" | "local" => Ok(StoreKind::Csv),
            other => Err(AppError::ConfigError(format!(
                "unknown store '{}' (expected sheets or csv)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreKind,
    pub sheet_id: Option<String>,
    pub access_token: Option<String>,
    pub data_sheet: String,
    pub viz_sheet: String,
    pub layout: Layout,
    pub max_rows: Option<usize>,
    pub data_dir: PathBuf,
    pub webhook_url: Option<String>,
    pub manual_trigger: bool,
    pub scheduled_run: bool,
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kahoot_board")
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let store = var("LEADERBOARD_STORE")
            .map(|s| s.parse::<StoreKind>())
            .transpose()?
            .unwrap_or(StoreKind::Sheets);

        let layout = var("LEADERBOARD_LAYOUT")
            .map(|s| s.parse::<Layout>())
            .transpose()?
            .unwrap_or(Layout::DateColumns);

        let max_rows = var("LEADERBOARD_MAX_ROWS")
            .map(|s| {
                s.trim().parse::<usize>().map_err(|_| {
                    AppError::ConfigError(format!("LEADERBOARD_MAX_ROWS must be a number, got '{}'", s))
                })
            })
            .transpose()?;

        Ok(Config {
            store,
            sheet_id: var("GOOGLE_SHEET_ID"),
            access_token: var("GOOGLE_ACCESS_TOKEN"),
            data_sheet: var("LEADERBOARD_DATA_SHEET").unwrap_or_else(|| "Team".to_string()),
            viz_sheet: var("LEADERBOARD_VIZ_SHEET").unwrap_or_else(|| "Viz".to_string()),
            layout,
            max_rows,
            data_dir: var("LEADERBOARD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            webhook_url: var("GOOGLE_CHAT_WEBHOOK_URL"),
            manual_trigger: var("MANUAL_TRIGGER")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            scheduled_run: var("GITHUB_ACTIONS").is_some() || var("SCHEDULED_RUN").is_some(),
        })
    }

    /// Row cap for the rendered table: explicit setting, else the layout's default.
    pub fn row_limit(&self) -> Option<usize> {
        self.max_rows.or_else(|| self.layout.default_max_rows())
    }

    /// Spreadsheet id and token, both required for the Sheets store.
    pub fn sheets_credentials(&self) -> Result<(&str, &str), AppError> {
        let sheet_id = self.sheet_id.as_deref().ok_or_else(|| {
            AppError::ConfigError("GOOGLE_SHEET_ID must be set in the environment or .env file".to_string())
        })?;
        let token = self.access_token.as_deref().ok_or_else(|| {
            AppError::ConfigError("GOOGLE_ACCESS_TOKEN must be set in the environment or .env file".to_string())
        })?;
        Ok((sheet_id, token))
    }
}
