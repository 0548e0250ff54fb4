//! Tasks that make up the scheduler core as well as the seams they share.
pub mod alarm_checker;
pub mod command_ingestor;
pub mod schedule;
