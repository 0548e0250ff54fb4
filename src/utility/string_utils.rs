//! # StringUtils
//! This module contains utility functions around string handling that are used in the project.

use crate::task::schedule::TimeOfDay;

/// Utility functions around string handling
pub struct StringUtils;

impl StringUtils {
    /// This function converts a &str in `HH:MM:SS` format to a `TimeOfDay`.
    /// One example being "07:30:00".
    ///
    /// Returns `None` when the string does not have exactly three
    /// colon-separated components, when a component is not a number, or when
    /// a component is out of range (hour > 23, minute or second > 59).
    /// Callers treat `None` as a malformed command and drop it.
    pub fn convert_str_to_time_of_day(s: &str) -> Option<TimeOfDay> {
        let mut parts = s.split(':');

        let hour = parts.next()?.parse::<u8>().ok()?;
        let minute = parts.next()?.parse::<u8>().ok()?;
        let second = parts.next()?.parse::<u8>().ok()?;

        // more than three components is malformed, not extra data to ignore
        if parts.next().is_some() {
            return None;
        }

        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }

        Some(TimeOfDay::new(hour, minute, second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_time() {
        assert_eq!(
            StringUtils::convert_str_to_time_of_day("07:30:00"),
            Some(TimeOfDay::new(7, 30, 0))
        );
        assert_eq!(
            StringUtils::convert_str_to_time_of_day("23:59:59"),
            Some(TimeOfDay::new(23, 59, 59))
        );
    }

    #[test]
    fn rejects_wrong_component_count() {
        assert_eq!(StringUtils::convert_str_to_time_of_day("07:30"), None);
        assert_eq!(StringUtils::convert_str_to_time_of_day("07:30:00:00"), None);
        assert_eq!(StringUtils::convert_str_to_time_of_day(""), None);
    }

    #[test]
    fn rejects_non_numeric_components() {
        assert_eq!(StringUtils::convert_str_to_time_of_day("ab:cd:ef"), None);
        assert_eq!(StringUtils::convert_str_to_time_of_day("07:30:xx"), None);
        assert_eq!(StringUtils::convert_str_to_time_of_day("::"), None);
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert_eq!(StringUtils::convert_str_to_time_of_day("24:00:00"), None);
        assert_eq!(StringUtils::convert_str_to_time_of_day("12:60:00"), None);
        assert_eq!(StringUtils::convert_str_to_time_of_day("12:00:60"), None);
        assert_eq!(StringUtils::convert_str_to_time_of_day("255:00:00"), None);
    }
}
