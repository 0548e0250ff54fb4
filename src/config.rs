//! Process-wide configuration of the scheduler core, fixed at build time.

use embassy_time::Duration;

/// Topic the consuming firmware subscribes to for schedule commands. Payloads
/// arriving on this topic are handed to the command ingestor.
pub const SCHEDULE_COMMAND_TOPIC: &str = "relay/schedule/set";

/// GPIO number the relay output is wired to.
pub const RELAY_PIN: u8 = 15;

/// Period of the alarm checker. The time match is exact to the second, so the
/// checker must tick at least once per second.
pub const ALARM_POLL_PERIOD: Duration = Duration::from_secs(1);

/// How long the alarm checker waits for the schedule store before giving up
/// on the current tick. Short, so contention can never stall the cadence.
pub const STORE_LOCK_TIMEOUT: Duration = Duration::from_millis(100);

/// Maximum size of an inbound command payload in bytes.
pub const COMMAND_PAYLOAD_CAPACITY: usize = 128;

/// Number of inbound payloads that may be queued before delivery backpressures.
pub const COMMAND_QUEUE_DEPTH: usize = 4;
