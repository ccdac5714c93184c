//! Period granularities used as record date keys.

use std::fmt;

use chrono::{DateTime, TimeZone};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};


/// How coarse a period key is. The key length alone identifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Year,
    Month,
    Day,
}


impl Granularity {
    /// All granularities, coarsest first.
    pub const ALL: [Granularity; 3] = [Granularity::Year, Granularity::Month, Granularity::Day];

    /// chrono format string producing the period key.
    pub fn date_format(self) -> &'static str {
        match self {
            Granularity::Year => "%Y",
            Granularity::Month => "%Y-%m",
            Granularity::Day => "%Y-%m-%d",
        }
    }

    /// Number of characters in a period key of this granularity.
    pub fn key_len(self) -> usize {
        match self {
            Granularity::Year => 4,
            Granularity::Month => 7,
            Granularity::Day => 10,
        }
    }

    /// Granularity of an existing period key, if its length is a known one.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::from_len(key.chars().count())
    }

    /// Granularity whose period keys have `len` characters.
    pub fn from_len(len: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.key_len() == len)
    }

    /// Period key containing `timestamp`, in the timestamp's own offset.
    pub fn period_key<Tz>(self, timestamp: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        timestamp.format(self.date_format()).to_string()
    }
}


impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Year => "year",
            Granularity::Month => "month",
            Granularity::Day => "day",
        };
        f.write_str(name)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_period_keys() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();

        assert_eq!(Granularity::Year.period_key(&ts), "2024");
        assert_eq!(Granularity::Month.period_key(&ts), "2024-03");
        assert_eq!(Granularity::Day.period_key(&ts), "2024-03-07");

        for g in Granularity::ALL {
            assert_eq!(g.period_key(&ts).len(), g.key_len());
        }
    }

    #[test]
    fn test_period_key_uses_logged_offset() {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let ts = offset.with_ymd_and_hms(2023, 12, 31, 22, 0, 0).unwrap();

        // 2024-01-01 05:00 UTC, but still the last day of 2023 where it was logged.
        assert_eq!(Granularity::Day.period_key(&ts), "2023-12-31");
        assert_eq!(Granularity::Year.period_key(&ts), "2023");
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Granularity::from_key("2024"), Some(Granularity::Year));
        assert_eq!(Granularity::from_key("2024-01"), Some(Granularity::Month));
        assert_eq!(Granularity::from_key("2024-01-01"), Some(Granularity::Day));
        assert_eq!(Granularity::from_key("24"), None);
    }

    #[test]
    fn test_from_len() {
        for g in Granularity::ALL {
            assert_eq!(Granularity::from_len(g.key_len()), Some(g));
        }
        assert_eq!(Granularity::from_len(0), None);
        assert_eq!(Granularity::from_len(8), None);
    }
}
