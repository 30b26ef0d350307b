//! Trending time windows

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ParseTimeWindowError;

/// The scope of a trending list.
///
/// External input (CLI arguments, settings) must go through [`FromStr`],
/// which rejects anything other than `day` or `week`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    /// Trending over the last day.
    #[default]
    Day,
    /// Trending over the last week.
    Week,
}

impl TimeWindow {
    /// All time windows, in display order.
    pub const ALL: [TimeWindow; 2] = [TimeWindow::Day, TimeWindow::Week];

    /// Returns the path segment used by the trending endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = ParseTimeWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            _ => Err(ParseTimeWindowError::new(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("day".parse::<TimeWindow>(), Ok(TimeWindow::Day));
        assert_eq!(" Week ".parse::<TimeWindow>(), Ok(TimeWindow::Week));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "month".parse::<TimeWindow>().unwrap_err();
        assert_eq!(err.input(), "month");
        assert!("".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn test_display_matches_endpoint_segment() {
        for window in TimeWindow::ALL {
            assert_eq!(window.to_string(), window.as_str());
            assert_eq!(window.as_str().parse::<TimeWindow>(), Ok(window));
        }
    }
}
