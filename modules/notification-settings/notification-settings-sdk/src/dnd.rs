//! Do-not-disturb window.

use std::fmt;

use thiserror::Error;
use time::Time;
use time::macros::format_description;

#[derive(Debug, Error)]
#[error("invalid do-not-disturb time '{value}', expected HH:mm: {source}")]
pub struct DndParseError {
    pub value: String,
    #[source]
    pub source: time::error::Parse,
}

/// A daily quiet period in local time, `[start, end)`.
///
/// When `end` is earlier than `start` the window wraps past midnight
/// (`22:00-07:00`). Equal bounds form an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DndWindow {
    start: Time,
    end: Time,
}

impl DndWindow {
    #[must_use]
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Parse two `HH:mm` strings.
    ///
    /// # Errors
    /// Returns [`DndParseError`] naming the first bound that does not parse.
    pub fn parse(start: &str, end: &str) -> Result<Self, DndParseError> {
        Ok(Self::new(parse_hh_mm(start)?, parse_hh_mm(end)?))
    }

    #[must_use]
    pub fn start(&self) -> Time {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Time {
        self.end
    }

    #[must_use]
    pub fn wraps_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Whether `at` falls inside the window.
    #[must_use]
    pub fn contains(&self, at: Time) -> bool {
        if self.wraps_midnight() {
            at >= self.start || at < self.end
        } else {
            self.start <= at && at < self.end
        }
    }

    /// `start` in wire form.
    #[must_use]
    pub fn start_hh_mm(&self) -> String {
        hh_mm(self.start)
    }

    /// `end` in wire form.
    #[must_use]
    pub fn end_hh_mm(&self) -> String {
        hh_mm(self.end)
    }
}

impl fmt::Display for DndWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", hh_mm(self.start), hh_mm(self.end))
    }
}

fn parse_hh_mm(value: &str) -> Result<Time, DndParseError> {
    Time::parse(value.trim(), format_description!("[hour]:[minute]")).map_err(|source| {
        DndParseError {
            value: value.to_owned(),
            source,
        }
    })
}

fn hh_mm(at: Time) -> String {
    format!("{:02}:{:02}", at.hour(), at.minute())
}
