use crate::NumError;

/// Upper bound on the number of candidates a randomized search may draw
/// before it gives up with [`NumError::SearchExhausted`].
///
/// The unbounded form keeps searching until it succeeds, which terminates
/// almost surely but with no latency guarantee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchBudget {
    max_attempts: Option<usize>,
}

impl SearchBudget {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 1 << 16;

    pub const fn at_most(max_attempts: usize) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    pub const fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    pub fn max_attempts(&self) -> Option<usize> {
        self.max_attempts
    }

    /// attempt numbers, starting from 1
    pub fn attempts(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.max_attempts.unwrap_or(usize::MAX)
    }

    pub fn exhausted(&self, what: &'static str) -> NumError {
        let attempts = self.max_attempts.unwrap_or(usize::MAX);
        log::warn!("{what}: gave up after {attempts} attempts");
        NumError::SearchExhausted { what, attempts }
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::at_most(Self::DEFAULT_MAX_ATTEMPTS)
    }
}
