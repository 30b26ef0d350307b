//! Time window parse error

/// Returned when a string is neither `day` nor `week`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown time window '{input}', expected 'day' or 'week'")]
pub struct ParseTimeWindowError {
    input: String,
}

impl ParseTimeWindowError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}
