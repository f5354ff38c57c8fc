//! CLI output formatting

use crate::execution::driver::{DriverEvent, RunStatus};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a driver event for display
pub fn format_driver_event(event: &DriverEvent) -> String {
    match event {
        DriverEvent::RunStarted { run_id, steps } => format!(
            "{} Starting run {} ({} steps)",
            ROCKET,
            style(&run_id.to_string()[..8]).dim(),
            style(steps.len()).cyan()
        ),
        DriverEvent::StepStarted {
            step,
            position,
            total,
        } => format!(
            "{} [{}/{}] {}",
            SPINNER,
            position,
            total,
            style(step).cyan()
        ),
        DriverEvent::StepCompleted { step } => {
            format!("{} {}", CHECK, style(step).green())
        }
        DriverEvent::StepFailed { step, reason } => {
            format!("{} {}: {}", CROSS, style(step).red(), reason)
        }
        DriverEvent::RunFinished { run_id, status } => match status {
            RunStatus::Completed => format!(
                "{} Run {} {}",
                CHECK,
                style(&run_id.to_string()[..8]).dim(),
                style("completed").green()
            ),
            RunStatus::Failed => format!(
                "{} Run {} {}",
                CROSS,
                style(&run_id.to_string()[..8]).dim(),
                style("failed").red()
            ),
        },
    }
}
