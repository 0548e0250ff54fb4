//! # Relay scheduler core
//! The coordination core of a remote-controlled relay: an inbound command
//! handler and a periodically polling alarm checker share a single schedule
//! slot and toggle a digital output when the scheduled time of day is reached.
//!
//! The hardware and network stack are left to the consuming firmware, which
//! provides three capabilities:
//! - message delivery: push decoded command payloads into the core with
//!   [`task::command_ingestor::deliver_command_payload`]
//! - a wall clock: implement [`task::alarm_checker::Clock`] over the RTC
//! - a digital output: implement [`task::alarm_checker::RelayOutput`] over
//!   the relay pin
//!
//! The long-running bodies are plain `async fn ... -> !` loops, meant to be
//! wrapped in `#[embassy_executor::task]` functions by the firmware.
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod task;
pub mod utility;
