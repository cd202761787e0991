use crate::analysis::Leaderboard;
use crate::error::AppError;
use crate::render::number::thousands;
use serde::Serialize;
use std::time::Duration;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];
const TOP_N: usize = 3;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Skipped,
}

/// Condensed top-three summary for the chat channel.
pub fn compose_message(board: &Leaderboard, total_games: usize) -> String {
    let mut text = String::from("🏆 *KAHOOT LEADERBOARD UPDATE* 🏆\n\n📊 *Top 3 Performers:*\n\n");

    for (medal, player) in MEDALS.iter().zip(board.top(TOP_N)) {
        text.push_str(&format!(
            "{} *{}* - {} points\n   • {} games played\n   • Best score: {}\n   • Win rate: {:.1}%\n\n",
            medal,
            player.player,
            thousands(player.total_score),
            player.games_played,
            thousands(player.best_score),
            player.win_rate(),
        ));
    }

    text.push_str(&format!("📈 *Total Games Played:* {}\n", total_games));
    text.push_str("🎯 *Keep up the great work, team!*");
    text
}

/// Destination for the periodic leaderboard alert.
pub trait Notifier {
    fn send(&self, board: &Leaderboard, total_games: usize) -> Result<Delivery, AppError>;
}

pub struct WebhookNotifier {
    url: Option<String>,
    agent: ureq::Agent,
}

impl WebhookNotifier {
    pub fn new(url: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();
        WebhookNotifier { url, agent }
    }
}

impl Notifier for WebhookNotifier {
    /// Post the summary once. Only HTTP 200 counts as delivered; nothing is retried.
    fn send(&self, board: &Leaderboard, total_games: usize) -> Result<Delivery, AppError> {
        let Some(url) = self.url.as_deref() else {
            log::warn!("Chat webhook URL not configured");
            return Ok(Delivery::Skipped);
        };

        if board.is_empty() {
            log::warn!("No leaderboard data to send");
            return Ok(Delivery::Skipped);
        }

        let text = compose_message(board, total_games);
        let response = self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_json(ChatMessage { text: &text });

        match response {
            Ok(resp) if resp.status() == 200 => {
                log::info!("Chat alert sent successfully");
                Ok(Delivery::Sent)
            }
            Ok(resp) => Err(AppError::NotificationFailure(format!("HTTP {}", resp.status()))),
            Err(ureq::Error::Status(code, _)) => {
                Err(AppError::NotificationFailure(format!("HTTP {}", code)))
            }
            Err(e) => Err(AppError::NotificationFailure(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PlayerStats;

    fn board() -> Leaderboard {
        let entry = |player: &str, total: f64, games: usize, best: f64, wins: usize| PlayerStats {
            player: player.to_string(),
            total_score: total,
            games_played: games,
            best_score: best,
            first_place_count: wins,
        };
        Leaderboard::from_entries(vec![
            entry("Alice", 25_300.0, 4, 9_100.0, 3),
            entry("Bob", 12_000.0, 3, 5_000.0, 1),
            entry("Cara", 4_000.0, 2, 2_500.0, 0),
            entry("Dan", 900.0, 1, 900.0, 0),
        ])
    }

    #[test]
    fn message_lists_top_three_and_game_count() {
        let text = compose_message(&board(), 7);

        assert!(text.starts_with("🏆 *KAHOOT LEADERBOARD UPDATE* 🏆"));
        assert!(text.contains("🥇 *Alice* - 25,300 points\n   • 4 games played\n   • Best score: 9,100\n   • Win rate: 75.0%"));
        assert!(text.contains("🥈 *Bob*"));
        assert!(text.contains("🥉 *Cara*"));
        assert!(!text.contains("Dan"));
        assert!(text.contains("📈 *Total Games Played:* 7\n"));
    }

    #[test]
    fn short_board_lists_what_it_has() {
        let single = Leaderboard::from_entries(board().top(1).to_vec());
        let text = compose_message(&single, 1);
        assert!(text.contains("🥇 *Alice*"));
        assert!(!text.contains("🥈"));
    }

    #[test]
    fn missing_url_skips_delivery() {
        let notifier = WebhookNotifier::new(None);
        assert_eq!(notifier.send(&board(), 3).unwrap(), Delivery::Skipped);
    }

    #[test]
    fn empty_board_skips_delivery() {
        let notifier = WebhookNotifier::new(Some("http://127.0.0.1:9/hook".to_string()));
        let sent = notifier.send(&Leaderboard::default(), 0).unwrap();
        assert_eq!(sent, Delivery::Skipped);
    }

    #[test]
    fn unreachable_endpoint_is_a_notification_failure() {
        let notifier = WebhookNotifier::new(Some("http://127.0.0.1:9/hook".to_string()));
        let err = notifier.send(&board(), 3).unwrap_err();
        assert!(matches!(err, AppError::NotificationFailure(_)));
    }
}
