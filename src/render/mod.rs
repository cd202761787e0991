pub mod dashboard;
pub mod grid;
pub mod number;
pub mod theme;

pub use dashboard::{build_dashboard, ranked_rows, Dashboard, DashboardContext, RankedRow, Summary};
pub use theme::Theme;
