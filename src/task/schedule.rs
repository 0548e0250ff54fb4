//! # Schedule Store
//! This module holds the single schedule slot shared between the command
//! ingestor (producer) and the alarm checker (consumer).
//!
//! The record is guarded by one mutex and only ever accessed through
//! [`ScheduleStore::set`], [`ScheduleStore::snapshot`] and
//! [`ScheduleStore::clear`], so a reader observes either a fully-prior write
//! or none of it. Readers copy the record out under the lock and run their
//! logic after releasing it, which bounds the lock hold time to a fixed-size
//! copy.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, with_timeout};

/// A wall-clock time of day with second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
}

impl TimeOfDay {
    /// Create a new `TimeOfDay`. The components are not range-checked here;
    /// parsing from the wire validates them.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Midnight, the placeholder value of an inactive schedule.
    pub const fn midnight() -> Self {
        Self::new(0, 0, 0)
    }
}

/// The binary output level applied to the relay when a schedule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayState {
    /// Relay open
    Off,
    /// Relay closed
    On,
}

impl RelayState {
    /// Map a numeric wire value to a relay state. Zero is off, anything else
    /// is on, same as writing the integer to the GPIO would behave.
    pub const fn from_level(level: u8) -> Self {
        if level == 0 { Self::Off } else { Self::On }
    }
}

/// The one pending schedule of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Schedule {
    /// The moment at which the relay action should fire
    target_time: TimeOfDay,
    /// The output level to apply when it fires
    desired_state: RelayState,
    /// Whether a pending schedule exists. When false, the other fields are
    /// stale data and must be ignored.
    active: bool,
}

impl Schedule {
    /// Create an inactive schedule, the state the system starts in.
    pub const fn new_empty() -> Self {
        Self {
            target_time: TimeOfDay::midnight(),
            desired_state: RelayState::Off,
            active: false,
        }
    }

    /// Whether a pending schedule exists
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Get the target time. Only meaningful while the schedule is active.
    pub const fn target_time(&self) -> TimeOfDay {
        self.target_time
    }

    /// Get the desired output level. Only meaningful while the schedule is active.
    pub const fn desired_state(&self) -> RelayState {
        self.desired_state
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new_empty()
    }
}

/// Type alias for the mutex guarding the schedule record.
type ScheduleMutex = Mutex<CriticalSectionRawMutex, Schedule>;

/// The mutex-guarded schedule slot. There is at most one pending schedule at
/// any time; a new command overwrites any existing one (last-write-wins).
///
/// `new` is `const`, so a consuming firmware can place the store in a
/// `static` and share it between its message handler and the checker task.
pub struct ScheduleStore {
    /// The guarded record. Private, all access goes through the methods below.
    inner: ScheduleMutex,
}

impl ScheduleStore {
    /// Create a store with no pending schedule.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Schedule::new_empty()),
        }
    }

    /// Atomically replace the stored schedule and mark it active.
    ///
    /// Waits on the lock without a timeout: the producer path must not drop
    /// legitimate commands, it is only ever delayed by the consumer's
    /// fixed-size copy.
    pub async fn set(&self, target_time: TimeOfDay, desired_state: RelayState) {
        let mut schedule = self.inner.lock().await;
        schedule.target_time = target_time;
        schedule.desired_state = desired_state;
        schedule.active = true;
    }

    /// Copy the full schedule record out under the lock.
    pub async fn snapshot(&self) -> Schedule {
        *self.inner.lock().await
    }

    /// Like [`Self::snapshot`], but gives up after `timeout` and returns
    /// `None`, so a periodic caller can skip its tick instead of stalling
    /// behind a contended lock.
    pub async fn snapshot_with_timeout(&self, timeout: Duration) -> Option<Schedule> {
        match with_timeout(timeout, self.inner.lock()).await {
            Ok(schedule) => Some(*schedule),
            Err(_) => None,
        }
    }

    /// Atomically deactivate the schedule. The other fields are left behind
    /// as stale data; they are rewritten by the next `set`.
    pub async fn clear(&self) {
        self.inner.lock().await.active = false;
    }

    /// Test hook: hold the lock to simulate a contended store.
    #[cfg(test)]
    pub(crate) async fn hold(
        &self,
    ) -> embassy_sync::mutex::MutexGuard<'_, CriticalSectionRawMutex, Schedule> {
        self.inner.lock().await
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}
