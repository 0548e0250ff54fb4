//! # Alarm Checker
//! This module contains the periodic task that fires the scheduled relay
//! action. Once per second it snapshots the schedule store, compares the
//! target against the wall clock and, on an exact match of hour, minute and
//! second, applies the desired output level and clears the schedule.
//!
//! The match is exact to the second on purpose: if a tick is delayed past the
//! target second, the alarm is missed and the schedule stays armed until it
//! is overwritten. There is no catch-up ("fire if the time has passed")
//! logic. Likewise a tick that cannot read the clock, or cannot get the store
//! within a short timeout, is skipped entirely and retried on the next
//! period; the checker never fires on uncertain time and never stalls its own
//! cadence waiting on contention.

use crate::config::{ALARM_POLL_PERIOD, STORE_LOCK_TIMEOUT};
use crate::task::schedule::{RelayState, ScheduleStore, TimeOfDay};
use embassy_time::Ticker;

/// Read access to the wall clock, implemented by the firmware over its RTC.
pub trait Clock {
    /// Error reported when the clock cannot be read (e.g. RTC not running).
    type Error;

    /// Returns the current time of day.
    fn now(&mut self) -> Result<TimeOfDay, Self::Error>;
}

/// A binary output under scheduler control, implemented by the firmware over
/// the relay GPIO. Setting the level is assumed to always succeed.
pub trait RelayOutput {
    /// Drive the output to the given level.
    fn set_state(&mut self, state: RelayState);
}

/// Periodic checker polling the schedule store against the clock.
pub struct AlarmChecker<'a, C, O> {
    /// The shared schedule slot, written by the command ingestor
    store: &'a ScheduleStore,
    /// The wall clock capability
    clock: C,
    /// The relay output capability
    relay: O,
}

impl<'a, C: Clock, O: RelayOutput> AlarmChecker<'a, C, O> {
    /// Create a checker over the given store and capabilities.
    pub const fn new(store: &'a ScheduleStore, clock: C, relay: O) -> Self {
        Self {
            store,
            clock,
            relay,
        }
    }

    /// One tick of the checker.
    ///
    /// The snapshot bounds the lock hold time; the clock read and the relay
    /// write happen after the lock is released, so unrelated I/O is never
    /// serialized behind the schedule lock.
    pub async fn poll_once(&mut self) {
        let Some(schedule) = self.store.snapshot_with_timeout(STORE_LOCK_TIMEOUT).await else {
            // contended; skip this tick and retry next period
            warn!("schedule store contended, skipping tick");
            return;
        };

        // idle: nothing pending, the clock is not even consulted
        if !schedule.is_active() {
            return;
        }

        let now = match self.clock.now() {
            Ok(now) => now,
            Err(_) => {
                // never fire on uncertain time
                warn!("clock read failed, skipping tick");
                return;
            }
        };

        if now == schedule.target_time() {
            info!(
                "schedule matched at {:02}:{:02}:{:02}, switching relay",
                now.hour, now.minute, now.second
            );
            self.relay.set_state(schedule.desired_state());
            // clear immediately so the same second cannot fire twice
            self.store.clear().await;
        }
    }

    /// Run loop of the checker, ticking at [`ALARM_POLL_PERIOD`] forever.
    /// Meant to be wrapped in an `#[embassy_executor::task]`.
    pub async fn run(mut self) -> ! {
        info!("alarm checker started");
        let mut ticker = Ticker::every(ALARM_POLL_PERIOD);
        loop {
            self.poll_once().await;
            ticker.next().await;
        }
    }
}
