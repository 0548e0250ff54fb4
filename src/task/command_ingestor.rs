//! # Command Ingestor
//! This module turns inbound message payloads into schedule updates.
//!
//! The external messaging stack (MQTT subscription, topic matching) is not
//! part of the core; whatever receives a message on
//! [`crate::config::SCHEDULE_COMMAND_TOPIC`] hands the raw payload to
//! [`deliver_command_payload`]. Delivery goes through a bounded channel, so
//! the messaging context never touches the schedule directly.
//!
//! A payload is JSON with a time-of-day string and a numeric output level:
//!
//! ```json
//! { "time": "07:30:00", "state": 1 }
//! ```
//!
//! Malformed payloads are dropped silently: no retry, no reply to the sender.

use crate::config::{COMMAND_PAYLOAD_CAPACITY, COMMAND_QUEUE_DEPTH};
use crate::task::schedule::{RelayState, ScheduleStore, TimeOfDay};
use crate::utility::string_utils::StringUtils;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;
use serde::Deserialize;

/// An opaque inbound message payload, copied out of the transport's buffer.
pub type CommandPayload = Vec<u8, COMMAND_PAYLOAD_CAPACITY>;

/// Channel handing payloads from the messaging context to the ingestor.
static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, CommandPayload, COMMAND_QUEUE_DEPTH> =
    Channel::new();

/// Hands an inbound payload to the ingestor. Called by the messaging glue
/// from its own execution context; waits only while the queue is full.
pub async fn deliver_command_payload(payload: CommandPayload) {
    COMMAND_CHANNEL.sender().send(payload).await;
}

/// Waits for the next inbound payload.
async fn next_command_payload() -> CommandPayload {
    COMMAND_CHANNEL.receiver().receive().await
}

/// The wire format of a schedule command.
#[derive(Deserialize)]
struct ScheduleCommand<'a> {
    /// Target time of day as an `HH:MM:SS` string
    time: &'a str,
    /// Output level to apply, zero or nonzero
    state: u8,
}

/// Parses and validates a raw payload. `None` means the payload is malformed
/// and must be dropped.
fn parse_command(payload: &[u8]) -> Option<(TimeOfDay, RelayState)> {
    let (command, _rest) = serde_json_core::de::from_slice::<ScheduleCommand>(payload).ok()?;
    let target_time = StringUtils::convert_str_to_time_of_day(command.time)?;
    Some((target_time, RelayState::from_level(command.state)))
}

/// Ingest a single payload: parse, validate and store. A well-formed command
/// overwrites any pending schedule; a malformed one changes nothing.
pub async fn ingest(store: &ScheduleStore, payload: &[u8]) {
    match parse_command(payload) {
        Some((target_time, desired_state)) => {
            info!(
                "schedule set for {:02}:{:02}:{:02}",
                target_time.hour, target_time.minute, target_time.second
            );
            store.set(target_time, desired_state).await;
        }
        None => {
            // silent drop, there is no error reporting channel back to the sender
            warn!("dropping malformed schedule command ({} bytes)", payload.len());
        }
    }
}

/// Run loop of the ingestor: receives payloads forever and applies them to
/// the store. Meant to be wrapped in an `#[embassy_executor::task]`.
pub async fn run(store: &ScheduleStore) -> ! {
    info!("command ingestor started");
    loop {
        let payload = next_command_payload().await;
        ingest(store, &payload).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    fn payload(bytes: &[u8]) -> CommandPayload {
        CommandPayload::from_slice(bytes).unwrap()
    }

    #[test]
    fn well_formed_command_sets_the_schedule() {
        let store = ScheduleStore::new();
        block_on(ingest(&store, br#"{"time":"07:30:00","state":1}"#));
        let snapshot = block_on(store.snapshot());
        assert!(snapshot.is_active());
        assert_eq!(snapshot.target_time(), TimeOfDay::new(7, 30, 0));
        assert_eq!(snapshot.desired_state(), RelayState::On);
    }

    #[test]
    fn zero_state_maps_to_off() {
        let store = ScheduleStore::new();
        block_on(ingest(&store, br#"{"time":"22:00:00","state":0}"#));
        let snapshot = block_on(store.snapshot());
        assert_eq!(snapshot.desired_state(), RelayState::Off);
    }

    #[test]
    fn missing_state_field_is_dropped() {
        let store = ScheduleStore::new();
        block_on(store.set(TimeOfDay::new(6, 0, 0), RelayState::On));
        block_on(ingest(&store, br#"{"time":"07:30:00"}"#));
        let snapshot = block_on(store.snapshot());
        // the existing schedule is untouched
        assert_eq!(snapshot.target_time(), TimeOfDay::new(6, 0, 0));
    }

    #[test]
    fn non_numeric_state_is_dropped() {
        let store = ScheduleStore::new();
        block_on(ingest(&store, br#"{"time":"07:30:00","state":"on"}"#));
        assert!(!block_on(store.snapshot()).is_active());
    }

    #[test]
    fn unparseable_time_is_dropped() {
        let store = ScheduleStore::new();
        block_on(ingest(&store, br#"{"time":"7h30","state":1}"#));
        block_on(ingest(&store, br#"{"time":"25:00:00","state":1}"#));
        assert!(!block_on(store.snapshot()).is_active());
    }

    #[test]
    fn non_json_payload_is_dropped() {
        let store = ScheduleStore::new();
        block_on(ingest(&store, b"\x00\x01\x02"));
        block_on(ingest(&store, b""));
        assert!(!block_on(store.snapshot()).is_active());
    }

    #[test]
    fn payloads_flow_through_the_channel() {
        let sent = payload(br#"{"time":"18:45:30","state":1}"#);
        block_on(deliver_command_payload(sent.clone()));
        let received = block_on(next_command_payload());
        assert_eq!(received, sent);
    }
}
