use std::fmt;

use thiserror::Error;

/// Length of a timed test. Only the fixed set below can be selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestDuration {
    Fifteen,
    #[default]
    Thirty,
    FortyFive,
    Sixty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported test duration {0}s, expected one of 15, 30, 45 or 60")]
pub struct InvalidDuration(pub u64);

impl TestDuration {
    pub const ALL: [TestDuration; 4] = [
        TestDuration::Fifteen,
        TestDuration::Thirty,
        TestDuration::FortyFive,
        TestDuration::Sixty,
    ];

    pub fn as_secs(self) -> u64 {
        match self {
            TestDuration::Fifteen => 15,
            TestDuration::Thirty => 30,
            TestDuration::FortyFive => 45,
            TestDuration::Sixty => 60,
        }
    }

    /// Next option in the selector, stopping at the longest one.
    pub fn longer(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    /// Previous option in the selector, stopping at the shortest one.
    pub fn shorter(self) -> Self {
        Self::ALL[self.position().saturating_sub(1)]
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|d| *d == self).unwrap_or(0)
    }
}

impl TryFrom<u64> for TestDuration {
    type Error = InvalidDuration;

    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_secs() == secs)
            .ok_or(InvalidDuration(secs))
    }
}

impl fmt::Display for TestDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_secs())
    }
}

/// clap value parser for `--duration`
pub fn parse_duration(s: &str) -> Result<TestDuration, String> {
    let secs: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not a number of seconds"))?;
    TestDuration::try_from(secs).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_try_from_accepts_fixed_set() {
        for secs in [15, 30, 45, 60] {
            let d = TestDuration::try_from(secs).unwrap();
            assert_eq!(d.as_secs(), secs);
        }
    }

    #[test]
    fn test_try_from_rejects_others() {
        assert_matches!(TestDuration::try_from(0), Err(InvalidDuration(0)));
        assert_matches!(TestDuration::try_from(20), Err(InvalidDuration(20)));
        assert_matches!(TestDuration::try_from(120), Err(InvalidDuration(120)));
    }

    #[test]
    fn test_default_is_thirty() {
        assert_eq!(TestDuration::default(), TestDuration::Thirty);
    }

    #[test]
    fn test_longer_and_shorter_clamp() {
        assert_eq!(TestDuration::Fifteen.shorter(), TestDuration::Fifteen);
        assert_eq!(TestDuration::Fifteen.longer(), TestDuration::Thirty);
        assert_eq!(TestDuration::FortyFive.longer(), TestDuration::Sixty);
        assert_eq!(TestDuration::Sixty.longer(), TestDuration::Sixty);
        assert_eq!(TestDuration::Sixty.shorter(), TestDuration::FortyFive);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("45"), Ok(TestDuration::FortyFive));
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("10").unwrap_err().contains("unsupported"));
    }

    #[test]
    fn test_display() {
        assert_eq!(TestDuration::Sixty.to_string(), "60");
    }
}
