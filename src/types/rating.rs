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

use crate::error::ErrorReport;
use crate::error::fail;

/// How confident the learner is that they know an item.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rating {
    NotConfident,
    Unsure,
    Familiar,
    Confident,
    VeryConfident,
}

impl Rating {
    #[cfg(test)]
    pub const ALL: [Rating; 5] = [
        Rating::NotConfident,
        Rating::Unsure,
        Rating::Familiar,
        Rating::Confident,
        Rating::VeryConfident,
    ];

    /// The numeric confidence level, from 1 to 5.
    pub fn value(self) -> u8 {
        match self {
            Rating::NotConfident => 1,
            Rating::Unsure => 2,
            Rating::Familiar => 3,
            Rating::Confident => 4,
            Rating::VeryConfident => 5,
        }
    }

    /// The number of days until an item rated this way is due again.
    pub fn interval_days(self) -> u32 {
        match self {
            Rating::NotConfident => 1,
            Rating::Unsure => 1,
            Rating::Familiar => 3,
            Rating::Confident => 7,
            Rating::VeryConfident => 30,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Rating::NotConfident => "not confident",
            Rating::Unsure => "unsure",
            Rating::Familiar => "familiar",
            Rating::Confident => "confident",
            Rating::VeryConfident => "very confident",
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rating::NotConfident),
            2 => Ok(Rating::Unsure),
            3 => Ok(Rating::Familiar),
            4 => Ok(Rating::Confident),
            5 => Ok(Rating::VeryConfident),
            _ => fail(format!("invalid confidence rating: {value}")),
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.value(), self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_values() {
        for rating in Rating::ALL {
            assert_eq!(Rating::try_from(rating.value()).unwrap(), rating);
        }
    }

    #[test]
    fn test_out_of_range() {
        assert!(Rating::try_from(0).is_err());
        let err = Rating::try_from(6).unwrap_err();
        assert_eq!(err.to_string(), "error: invalid confidence rating: 6");
    }

    #[test]
    fn test_intervals() {
        let intervals: Vec<u32> = Rating::ALL.iter().map(|r| r.interval_days()).collect();
        assert_eq!(intervals, vec![1, 1, 3, 7, 30]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rating::Familiar.to_string(), "3 (familiar)");
    }
}
