use std::time::Duration;
use chrono::{DateTime, Local};
use crate::event::{Event, Phase};
use crate::run::RunReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Turns events into the lines printed by the demo.
///
/// Timestamps are the wall time the run started at plus the event's offset,
/// so a run on a simulated clock still prints readable dates.
#[derive(Debug, Clone)]
pub struct ConsoleRenderer {
    started_at: DateTime<Local>,
    format: OutputFormat,
}

impl ConsoleRenderer {
    pub fn new(started_at: DateTime<Local>, format: OutputFormat) -> Self {
        Self { started_at, format }
    }

    pub fn render(&self, event: &Event) -> String {
        match self.format {
            OutputFormat::Text => format!("[{}] {}", self.timestamp(event.at), describe(event)),
            OutputFormat::Json => serde_json::to_string(event).unwrap_or_else(|err| {
                format!("{{\"seq\":{},\"error\":\"{err}\"}}", event.seq)
            }),
        }
    }

    pub fn render_summary(&self, report: &RunReport) -> String {
        match self.format {
            OutputFormat::Text => format!(
                "Total time: {}\nSequential estimate: {}",
                report.elapsed.as_secs_f64(),
                report.sequential_estimate.as_secs_f64(),
            ),
            OutputFormat::Json => serde_json::json!({
                "total_ms": u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
                "sequential_estimate_ms": u64::try_from(report.sequential_estimate.as_millis()).unwrap_or(u64::MAX),
                "mode": report.mode,
            })
            .to_string(),
        }
    }

    fn timestamp(&self, at: Duration) -> String {
        let at = chrono::Duration::from_std(at)
            .ok()
            .and_then(|offset| self.started_at.checked_add_signed(offset))
            .unwrap_or(self.started_at);

        at.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

/// The sentence a phase transition is announced with.
pub fn describe(event: &Event) -> String {
    let name = &event.name;
    match event.phase {
        Phase::Queued { guess_count, .. } => {
            format!("Can you (Mr.{name}) wait for me to process {guess_count} earlier guess?")
        }
        Phase::Ordering => format!("Mr.{name}, please order your pizza"),
        Phase::Cooking => format!("Mr.{name}, I am making your pizza"),
        Phase::Ready => format!("Mr.{name}, your pizza is ready"),
    }
}
