// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDateTime;
use chrono::TimeDelta;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// The format `datetime.isoformat()` produces for naive local timestamps.
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[cfg(test)]
    pub fn new(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// The time elapsed between `earlier` and this timestamp.
    pub fn since(self, earlier: Timestamp) -> TimeDelta {
        self.0 - earlier.0
    }

    #[cfg(test)]
    pub fn minus_days(self, days: i64) -> Self {
        Self(self.0 - TimeDelta::days(days))
    }

    /// Parses an RFC 3339 timestamp. Timestamps without an offset are
    /// interpreted in the local time zone.
    pub fn parse(s: &str) -> Fallible<Self> {
        Self::parse_in(s, &Local)
    }

    fn parse_in<Tz: TimeZone>(s: &str, tz: &Tz) -> Fallible<Self> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(ts.with_timezone(&Utc)));
        }
        let naive = NaiveDateTime::parse_from_str(s, NAIVE_FORMAT)
            .map_err(|_| ErrorReport::new(format!("invalid timestamp: {s}")))?;
        Ok(Self(resolve_local(naive, tz)))
    }
}

/// Place a naive local time on the timeline. Ambiguous times take the
/// earlier instant. Times skipped by a forward clock change are read as
/// if the clock had already moved, and anything still unresolved is read
/// as UTC.
fn resolve_local<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    if let Some(ts) = tz.from_local_datetime(&naive).earliest() {
        return ts.with_timezone(&Utc);
    }
    let shifted = naive + TimeDelta::hours(1);
    match tz.from_local_datetime(&shifted).earliest() {
        Some(ts) => ts.with_timezone(&Utc),
        None => {
            log::warn!("Local time {naive} does not exist. Reading it as UTC.");
            naive.and_utc()
        }
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Timestamp::parse(&string).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use chrono::LocalResult;
    use chrono::NaiveDate;

    use super::*;

    /// Eastern time around the 2025-03-09 spring-forward change: local
    /// times from 02:00 to 03:00 that day do not exist.
    #[derive(Clone)]
    struct SpringForward;

    impl SpringForward {
        fn standard() -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }

        fn daylight() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }

        fn change_day() -> NaiveDate {
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            if *local < Self::change_day() {
                LocalResult::Single(Self::standard())
            } else {
                LocalResult::Single(Self::daylight())
            }
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = Self::change_day().and_hms_opt(2, 0, 0).unwrap();
            let gap_end = Self::change_day().and_hms_opt(3, 0, 0).unwrap();
            if *local < gap_start {
                LocalResult::Single(Self::standard())
            } else if *local < gap_end {
                LocalResult::None
            } else {
                LocalResult::Single(Self::daylight())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            if *utc < Self::change_day() {
                Self::standard()
            } else {
                Self::daylight()
            }
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            let change = Self::change_day().and_hms_opt(7, 0, 0).unwrap();
            if *utc < change {
                Self::standard()
            } else {
                Self::daylight()
            }
        }
    }

    #[test]
    fn test_parse_rfc3339() -> Fallible<()> {
        let ts = Timestamp::parse("2025-03-01T12:30:00+02:00")?;
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(ts, Timestamp::new(expected));
        Ok(())
    }

    #[test]
    fn test_parse_naive() -> Fallible<()> {
        let ts = Timestamp::parse("2025-03-01T12:30:00.123456")?;
        let expected = NaiveDateTime::parse_from_str("2025-03-01T12:30:00.123456", NAIVE_FORMAT)
            .unwrap()
            .and_local_timezone(Local)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(ts, Timestamp::new(expected));
        Ok(())
    }

    #[test]
    fn test_parse_time_in_clock_gap() -> Fallible<()> {
        let ts = Timestamp::parse_in("2025-03-09T02:30:00.000001", &SpringForward)?;
        let expected = Utc.with_ymd_and_hms(2025, 3, 9, 7, 30, 0).unwrap()
            + TimeDelta::microseconds(1);
        assert_eq!(ts, Timestamp::new(expected));
        Ok(())
    }

    #[test]
    fn test_parse_around_clock_gap() -> Fallible<()> {
        let before = Timestamp::parse_in("2025-03-09T01:30:00", &SpringForward)?;
        let after = Timestamp::parse_in("2025-03-09T03:30:00", &SpringForward)?;
        let before_utc = Utc.with_ymd_and_hms(2025, 3, 9, 6, 30, 0).unwrap();
        let after_utc = Utc.with_ymd_and_hms(2025, 3, 9, 7, 30, 0).unwrap();
        assert_eq!(before, Timestamp::new(before_utc));
        assert_eq!(after, Timestamp::new(after_utc));
        Ok(())
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn test_json() -> Fallible<()> {
        let ts = Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
        let json = serde_json::to_string(&ts)?;
        assert_eq!(json, "\"2025-01-02T03:04:05+00:00\"");
        let back: Timestamp = serde_json::from_str(&json)?;
        assert_eq!(back, ts);
        Ok(())
    }

    #[test]
    fn test_since() {
        let now = Timestamp::now();
        assert_eq!(now.since(now.minus_days(3)), TimeDelta::days(3));
    }
}
