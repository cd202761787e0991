use crate::render::{RankedRow, Summary};
use crate::snapshot::RunSnapshot;
use chrono::Utc;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct LeaderboardRow {
    rank: String,
    player: String,
    #[tabled(rename = "total")]
    total_score: String,
    games: String,
    best: String,
    avg: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
    badges: String,
}

pub fn display_leaderboard(rows: &[RankedRow], summary: &Summary) {
    println!("\n{}", "🏆 KAHOOT GAMES LEADERBOARD".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if rows.is_empty() {
        println!("{}", "No leaderboard data available".yellow());
    } else {
        let table_rows: Vec<LeaderboardRow> = rows
            .iter()
            .map(|r| LeaderboardRow {
                rank: format!("#{}", r.rank),
                player: r.player.clone(),
                total_score: r.total_score.clone(),
                games: r.games_played.to_string(),
                best: r.best_score.clone(),
                avg: r.avg_score.clone(),
                win_rate: r.win_rate.clone(),
                badges: r.badge_text(),
            })
            .collect();

        let mut table = Table::new(table_rows);
        table.with(Style::rounded());
        println!("{}", table);
    }

    println!("\n{}", "Summary".bold().yellow());
    for (label, value) in summary.lines() {
        println!("• {} {}", label, value);
    }
    println!();
}

/// Menu body; the success line only appears when the first refresh published.
pub fn menu_lines(published: bool) -> Vec<&'static str> {
    let mut lines = Vec::new();
    if published {
        lines.push("Dashboard created successfully!");
    }
    lines.extend([
        "\nOptions:",
        "1. One-time refresh (default)",
        "2. Auto-refresh every 5 minutes",
        "3. Auto-refresh with custom interval",
        "4. Run scheduled tasks (dry run)",
    ]);
    lines
}

pub fn display_menu(published: bool) {
    println!("\n{}", "=".repeat(60));
    println!("{}", "KAHOOT LEADERBOARD DASHBOARD".bold());
    println!("{}", "=".repeat(60));
    for line in menu_lines(published) {
        println!("{}", line);
    }
}

pub fn display_snapshot(snapshot: Option<&RunSnapshot>) {
    let Some(snap) = snapshot else {
        display_info("No previous refresh recorded");
        return;
    };

    println!(
        "{} {} players, {} games, leader {} ({} min ago)",
        "🕒 Last refresh:".bold(),
        snap.players,
        snap.total_games,
        snap.leader.as_deref().unwrap_or("none"),
        snap.age_minutes(Utc::now())
    );
    if let Some(alert) = snap.last_alert_at {
        println!("   Last alert sent {}", alert.format("%d-%b-%Y %H:%M UTC"));
    }
}

pub fn display_alert_preview(message: &str) {
    println!("\n{}", "📣 Alert preview (not sent)".bold().yellow());
    println!("{}\n", "-".repeat(60).yellow());
    println!("{}\n", message);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
