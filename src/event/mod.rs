//! The structured event log.
//!
//! Every phase transition a workflow goes through is recorded as an [`Event`]. The log keeps them
//! in emission order, and also forwards each one to its subscribers as it happens, so the console
//! renderer and a test harness read the same history.
pub mod render;

pub use render::*;

use std::time::Duration;
use crossbeam::channel::{self, Receiver, Sender};
use serde::Serialize;
use crate::scheduler::TaskId;

/// A phase of the pizza-ordering workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// The customer is asked to wait for `guess_count` earlier guesses. Suspends for `wait`.
    Queued {
        guess_count: u32,
        #[serde(rename = "wait_ms", with = "crate::utils::millis")]
        wait: Duration,
    },
    /// The customer is ordering. This step blocks the thread.
    Ordering,
    /// The pizza is in the oven. Suspends.
    Cooking,
    /// The workflow has finished.
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Position in the log, starting at zero.
    pub seq: u64,
    pub task: TaskId,
    pub name: String,
    /// Offset from the start of the run.
    #[serde(rename = "at_ms", with = "crate::utils::millis")]
    pub at: Duration,
    #[serde(flatten)]
    pub phase: Phase,
}

#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
    subscribers: Vec<Sender<Event>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a receiver of every event recorded from now on.
    /// The channel is closed when the run finishes, successfully or not.
    pub fn subscribe(&mut self) -> Receiver<Event> {
        let (sender, receiver) = channel::unbounded();
        self.subscribers.push(sender);
        receiver
    }

    /// Forwards every event recorded from now on to `sender`.
    pub fn add_subscriber(&mut self, sender: Sender<Event>) {
        self.subscribers.push(sender);
    }

    pub(crate) fn record(&mut self, task: TaskId, name: &str, at: Duration, phase: Phase) {
        let event = Event {
            seq: self.events.len() as u64,
            task,
            name: name.to_string(),
            at,
            phase,
        };

        // a subscriber that went away is dropped, the others still get the event
        self.subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        self.events.push(event);
    }

    /// Drops all subscribers, closing their channels.
    pub(crate) fn close(&mut self) {
        self.subscribers.clear();
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_subscribe() {
        let mut log = EventLog::new();
        log.record(TaskId(0), "HungPT", Duration::ZERO, Phase::Ordering);

        let receiver = log.subscribe();
        log.record(TaskId(0), "HungPT", Duration::from_secs(3), Phase::Cooking);
        log.close();

        let received: Vec<Event> = receiver.iter().collect();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].seq, 1);
        assert_eq!(received[0].phase, Phase::Cooking);

        assert_eq!(log.events().len(), 2);
        assert_eq!(log.events()[0].phase, Phase::Ordering);
    }

    #[test]
    fn test_dropped_subscriber_is_forgotten() {
        let mut log = EventLog::new();
        drop(log.subscribe());
        log.record(TaskId(1), "DieuNH", Duration::ZERO, Phase::Ready);

        assert!(log.subscribers.is_empty());
        assert_eq!(log.take_events().len(), 1);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_event_to_json() {
        let event = Event {
            seq: 4,
            task: TaskId(1),
            name: "DieuNH".to_string(),
            at: Duration::from_millis(1500),
            phase: Phase::Queued { guess_count: 1, wait: Duration::from_secs(3) },
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({
            "seq": 4,
            "task": 1,
            "name": "DieuNH",
            "at_ms": 1500,
            "phase": "queued",
            "guess_count": 1,
            "wait_ms": 3000,
        }));
    }
}
