//! A single request line from a web server access log.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::Granularity;


/// One parsed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub host: String,
    pub timestamp: DateTime<FixedOffset>,
    pub method: String,
    pub resource: String,
    pub status: u16,
}


impl LogEntry {
    /// Period key for grouping, e.g. `2024-01-15` for `Granularity::Day`.
    pub fn date_key(&self, granularity: Granularity) -> String {
        granularity.period_key(&self.timestamp)
    }

    /// Whether the request was served (2xx) or redirected (3xx).
    pub fn is_hit(&self) -> bool {
        self.status < 400
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: u16) -> LogEntry {
        LogEntry {
            host: "127.0.0.1".to_string(),
            timestamp: DateTime::parse_from_rfc3339("2024-01-15T10:30:00+02:00").unwrap(),
            method: "GET".to_string(),
            resource: "/index.html".to_string(),
            status,
        }
    }

    #[test]
    fn test_date_key() {
        let e = entry(200);
        assert_eq!(e.date_key(Granularity::Year), "2024");
        assert_eq!(e.date_key(Granularity::Month), "2024-01");
        assert_eq!(e.date_key(Granularity::Day), "2024-01-15");
    }

    #[test]
    fn test_is_hit() {
        assert!(entry(200).is_hit());
        assert!(entry(304).is_hit());
        assert!(!entry(404).is_hit());
        assert!(!entry(500).is_hit());
    }
}
