pub mod schedule;
pub mod webhook;

pub use schedule::{AlertSchedule, AlertState};
pub use webhook::{compose_message, Delivery, Notifier, WebhookNotifier};
